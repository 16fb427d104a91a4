// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn permits_up_to_capacity_are_admitted_immediately() {
    let gate = AdmissionController::new(2);
    let a = gate.acquire().await;
    let b = gate.acquire().await;
    assert_eq!(gate.available_permits(), 0);
    drop(a);
    drop(b);
    assert_eq!(gate.available_permits(), 2);
}

#[tokio::test]
async fn waiter_is_admitted_only_after_a_permit_is_released_property_p2() {
    let gate = AdmissionController::new(1);
    let first = gate.acquire().await;
    assert_eq!(gate.available_permits(), 0);

    let gate2 = gate.clone();
    let waiter = tokio::spawn(async move {
        let _permit = gate2.acquire().await;
    });

    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    drop(first);
    waiter.await.unwrap_or(());
    assert_eq!(gate.available_permits(), 1);
}
