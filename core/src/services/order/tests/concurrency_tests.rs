//! Concurrent order placement against a single good

use std::sync::Arc;

use crate::domain::entities::good::Good;
use crate::domain::entities::user::NewUser;
use crate::errors::OrderError;
use crate::repositories::MockOrderRepository;
use crate::services::order::OrderService;

async fn race(buyers: u64) -> (Arc<MockOrderRepository>, Vec<Result<u64, OrderError>>) {
    let repo = Arc::new(MockOrderRepository::new());
    repo.insert_good(Good::new(7, 3, 100)).await;
    repo.insert_address(10).await;
    let service = Arc::new(OrderService::new(Arc::clone(&repo)));

    let barrier = Arc::new(tokio::sync::Barrier::new(buyers as usize));
    let mut handles = Vec::new();

    for buyer_id in 1..=buyers {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            let buyer = NewUser::new("13800138000", "hash", "buyer").into_user(buyer_id);
            barrier.wait().await;
            service
                .create_order(&buyer, 7, 10)
                .await
                .map(|order| order.pay_money as u64)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    (repo, results)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_buyers_race_for_good_7() {
    let (repo, results) = race(2).await;

    let placed: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let sold: Vec<_> = results
        .iter()
        .filter(|r| matches!(r, Err(OrderError::AlreadySold)))
        .collect();

    assert_eq!(placed, vec![&100]);
    assert_eq!(sold.len(), 1);
    assert!(repo.good(7).await.unwrap().is_sold);
    assert_eq!(repo.orders_for_good(7).await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_exactly_one_winner_for_many_buyers() {
    for buyers in [3u64, 16, 64] {
        let (repo, results) = race(buyers).await;

        let winners = results.iter().filter(|r| r.is_ok()).count();
        let losers = results
            .iter()
            .filter(|r| matches!(r, Err(OrderError::AlreadySold)))
            .count();

        assert_eq!(winners, 1, "buyers = {}", buyers);
        assert_eq!(losers as u64, buyers - 1, "buyers = {}", buyers);
        assert!(repo.good(7).await.unwrap().is_sold);
        assert_eq!(repo.orders_for_good(7).await.len(), 1);
    }
}

#[tokio::test]
async fn test_loser_passing_the_early_check_gets_already_sold() {
    // On one thread both buyers read the good as unsold before either reserves
    let (repo, results) = race(2).await;

    assert_eq!(repo.find_good_calls(), 2);
    assert_eq!(repo.place_order_calls(), 2);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(OrderError::AlreadySold))));
}
