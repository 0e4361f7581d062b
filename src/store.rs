//! In-memory order store
//!
//! One dashmap entry per order. All mutation goes through [`OrderStore::update`],
//! which holds the entry's write guard for the whole check-and-set, so two
//! concurrent transitions on the same order serialize and the loser sees the
//! refreshed status. Reads clone out and never block writers globally.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ServiceError, ServiceResult};
use crate::models::Order;

pub struct OrderStore {
    orders: DashMap<u64, Order>,
    order_id_gen: AtomicU64,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            order_id_gen: AtomicU64::new(1),
        }
    }

    pub fn next_order_id(&self) -> u64 {
        self.order_id_gen.fetch_add(1, Ordering::SeqCst)
    }

    pub fn insert(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    pub fn get(&self, order_id: u64) -> ServiceResult<Order> {
        self.orders
            .get(&order_id)
            .map(|o| o.clone())
            .ok_or_else(|| ServiceError::order_not_found(order_id))
    }

    /// Apply `f` to the order under its entry lock. The closure validates
    /// against the current state and mutates only on success; the updated
    /// order is cloned out after `f` returns.
    pub fn update<F>(&self, order_id: u64, f: F) -> ServiceResult<Order>
    where
        F: FnOnce(&mut Order) -> ServiceResult<()>,
    {
        let mut entry = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ServiceError::order_not_found(order_id))?;
        f(entry.value_mut())?;
        Ok(entry.clone())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Snapshot of orders matching `pred`. Not linearizable with in-flight
    /// transitions, which is fine for list views and stats.
    pub fn filter<P>(&self, pred: P) -> Vec<Order>
    where
        P: Fn(&Order) -> bool,
    {
        self.orders
            .iter()
            .filter(|o| pred(o.value()))
            .map(|o| o.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<Order> {
        self.filter(|_| true)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, ServiceType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(id: u64) -> Order {
        Order {
            id,
            student_id: 1,
            personnel_id: Some(1),
            items: vec![],
            service_type: ServiceType::Normal,
            urgency_days: 3,
            total_price: dec!(0),
            status: OrderStatus::Pending,
            pickup_location: "Hostel A".to_string(),
            rejection_reason: None,
            photo_url: None,
            student_rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            accepted_at: None,
            collection_at: None,
            washing_at: None,
            ironing_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn ids_are_monotonic() {
        let store = OrderStore::new();
        let a = store.next_order_id();
        let b = store.next_order_id();
        assert!(b > a);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let store = OrderStore::new();
        assert_eq!(store.get(99), Err(ServiceError::order_not_found(99)));
    }

    #[test]
    fn update_returns_refreshed_clone() {
        let store = OrderStore::new();
        store.insert(order(1));
        let updated = store
            .update(1, |o| {
                o.status = OrderStatus::Accepted;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Accepted);
        assert_eq!(store.get(1).unwrap().status, OrderStatus::Accepted);
    }

    #[test]
    fn update_error_propagates() {
        let store = OrderStore::new();
        store.insert(order(1));
        let res = store.update(1, |_| Err(ServiceError::validation("nope")));
        assert_eq!(res, Err(ServiceError::validation("nope")));
    }

    #[test]
    fn concurrent_updates_serialize() {
        use std::sync::Arc;
        let store = Arc::new(OrderStore::new());
        store.insert(order(7));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.update(7, |o| {
                    if o.status != OrderStatus::Pending {
                        return Err(ServiceError::InvalidTransition {
                            from: o.status,
                            to: OrderStatus::Accepted,
                        });
                    }
                    o.status = OrderStatus::Accepted;
                    Ok(())
                })
            }));
        }
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(wins, 1);
    }
}
