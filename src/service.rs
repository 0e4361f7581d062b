//! OrderLifecycleService - order creation, pricing, transitions, ratings,
//! and read projections
//!
//! Business logic lives here, separate from the HTTP handlers. Every
//! mutation validates fully before any field changes, then goes through the
//! store's per-order locked update.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::Catalog;
use crate::directory::{Directory, Personnel};
use crate::error::{ServiceError, ServiceResult};
use crate::lifecycle;
use crate::models::{Order, OrderItem, OrderStatus, ServiceType};
use crate::pricing;
use crate::store::OrderStore;

/// Inputs for [`OrderLifecycleService::create`]. Item lines carry no price;
/// the service resolves unit prices from the catalog and freezes them.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub student_id: u64,
    pub personnel_id: u64,
    pub items: Vec<DraftItem>,
    pub service_type: ServiceType,
    pub urgency_days: u8,
    pub pickup_location: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DraftItem {
    pub item_type: String,
    pub quantity: u32,
}

/// Completed-count and earnings rollup for one personnel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonnelWorkStats {
    pub completed_orders: u64,
    pub total_earnings: Decimal,
}

pub struct OrderLifecycleService {
    store: OrderStore,
    directory: Arc<Directory>,
    catalog: Catalog,
}

impl OrderLifecycleService {
    pub fn new(directory: Arc<Directory>, catalog: Catalog) -> Self {
        Self {
            store: OrderStore::new(),
            directory,
            catalog,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create an order in PENDING with the personnel the student selected.
    pub fn create(&self, draft: OrderDraft) -> ServiceResult<Order> {
        if draft.items.is_empty() {
            return Err(ServiceError::validation("order must contain at least one item"));
        }
        for item in &draft.items {
            if item.quantity < 1 {
                return Err(ServiceError::validation(format!(
                    "quantity for {} must be at least 1",
                    item.item_type
                )));
            }
            if !self.catalog.contains(&item.item_type) {
                return Err(ServiceError::validation(format!(
                    "unknown item type: {}",
                    item.item_type
                )));
            }
        }
        match (draft.service_type, draft.urgency_days) {
            (ServiceType::Urgent, 1 | 2) => {}
            (ServiceType::Normal, 3) => {}
            (ServiceType::Urgent, d) => {
                return Err(ServiceError::validation(format!(
                    "URGENT service requires 1 or 2 urgency days, got {}",
                    d
                )));
            }
            (ServiceType::Normal, d) => {
                return Err(ServiceError::validation(format!(
                    "NORMAL service implies 3 urgency days, got {}",
                    d
                )));
            }
        }
        if draft.pickup_location.trim().is_empty() {
            return Err(ServiceError::validation("pickup location must not be empty"));
        }
        if !self.directory.has_student(draft.student_id) {
            return Err(ServiceError::student_not_found(draft.student_id));
        }
        if !self.directory.has_personnel(draft.personnel_id) {
            return Err(ServiceError::personnel_not_found(draft.personnel_id));
        }

        // Freeze unit prices from the catalog as of now.
        let items: Vec<OrderItem> = draft
            .items
            .iter()
            .map(|d| OrderItem {
                item_type: d.item_type.clone(),
                quantity: d.quantity,
                // contains() was checked above
                price_per_item: self.catalog.unit_price(&d.item_type).unwrap_or_default(),
            })
            .collect();
        let total_price = pricing::total_price(&items, draft.urgency_days);

        let now = Utc::now();
        let order = Order {
            id: self.store.next_order_id(),
            student_id: draft.student_id,
            personnel_id: Some(draft.personnel_id),
            items,
            service_type: draft.service_type,
            urgency_days: draft.urgency_days,
            total_price,
            status: OrderStatus::Pending,
            pickup_location: draft.pickup_location,
            rejection_reason: None,
            photo_url: draft.photo_url,
            student_rating: None,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            collection_at: None,
            washing_at: None,
            ironing_at: None,
            completed_at: None,
        };
        self.store.insert(order.clone());
        tracing::info!(
            order_id = order.id,
            student_id = order.student_id,
            total = %order.total_price,
            "order created"
        );
        Ok(order)
    }

    /// Accept a PENDING order, binding it to the accepting personnel.
    pub fn accept(&self, order_id: u64, personnel_id: u64) -> ServiceResult<Order> {
        if !self.directory.has_personnel(personnel_id) {
            return Err(ServiceError::personnel_not_found(personnel_id));
        }
        let order = self.store.update(order_id, |order| {
            if order.status != OrderStatus::Pending {
                return Err(ServiceError::InvalidTransition {
                    from: order.status,
                    to: OrderStatus::Accepted,
                });
            }
            let now = Utc::now();
            order.status = OrderStatus::Accepted;
            order.personnel_id = Some(personnel_id);
            order.accepted_at = Some(now);
            order.updated_at = now;
            Ok(())
        })?;
        tracing::info!(order_id, personnel_id, "order accepted");
        Ok(order)
    }

    /// Reject a PENDING order with a non-empty reason. Terminal.
    pub fn reject(&self, order_id: u64, reason: &str) -> ServiceResult<Order> {
        if reason.trim().is_empty() {
            return Err(ServiceError::validation("rejection reason must not be empty"));
        }
        let order = self.store.update(order_id, |order| {
            if order.status != OrderStatus::Pending {
                return Err(ServiceError::InvalidTransition {
                    from: order.status,
                    to: OrderStatus::Rejected,
                });
            }
            order.status = OrderStatus::Rejected;
            order.rejection_reason = Some(reason.trim().to_string());
            order.updated_at = Utc::now();
            Ok(())
        })?;
        tracing::info!(order_id, "order rejected");
        Ok(order)
    }

    /// Advance to the single next stage of the post-acceptance chain.
    ///
    /// ACCEPTED and REJECTED are reachable only through `accept`/`reject`,
    /// which carry their extra fields; requesting them here fails like any
    /// other off-table transition.
    pub fn advance_status(&self, order_id: u64, requested: OrderStatus) -> ServiceResult<Order> {
        if matches!(requested, OrderStatus::Accepted | OrderStatus::Rejected) {
            let current = self.store.get(order_id)?.status;
            return Err(ServiceError::InvalidTransition {
                from: current,
                to: requested,
            });
        }
        let order = self.store.update(order_id, |order| {
            if !lifecycle::is_valid_transition(order.status, requested) {
                return Err(ServiceError::InvalidTransition {
                    from: order.status,
                    to: requested,
                });
            }
            let now = Utc::now();
            order.status = requested;
            match requested {
                OrderStatus::PendingCollection => order.collection_at = Some(now),
                OrderStatus::Washing => order.washing_at = Some(now),
                OrderStatus::Ironing => order.ironing_at = Some(now),
                OrderStatus::Done => order.completed_at = Some(now),
                _ => {}
            }
            order.updated_at = now;
            Ok(())
        })?;
        tracing::info!(order_id, status = %requested, "order status advanced");
        Ok(order)
    }

    /// Attach a 1-5 star rating to a DONE order, exactly once, by its owner.
    /// Recomputes the personnel's running average afterwards.
    pub fn rate(&self, order_id: u64, student_id: u64, stars: u8) -> ServiceResult<Order> {
        if !(1..=5).contains(&stars) {
            return Err(ServiceError::validation("rating must be between 1 and 5"));
        }
        let order = self.store.update(order_id, |order| {
            if order.student_id != student_id {
                return Err(ServiceError::validation(
                    "only the ordering student may rate this order",
                ));
            }
            if order.status != OrderStatus::Done {
                return Err(ServiceError::InvalidTransition {
                    from: order.status,
                    to: OrderStatus::Done,
                });
            }
            if order.student_rating.is_some() {
                return Err(ServiceError::AlreadyRated(order.id));
            }
            order.student_rating = Some(stars);
            Ok(())
        })?;

        if let Some(personnel_id) = order.personnel_id {
            self.refresh_personnel_rating(personnel_id);
        }
        tracing::info!(order_id, stars, "order rated");
        Ok(order)
    }

    fn refresh_personnel_rating(&self, personnel_id: u64) {
        let rated: Vec<u8> = self
            .store
            .filter(|o| {
                o.personnel_id == Some(personnel_id) && o.status == OrderStatus::Done
            })
            .iter()
            .filter_map(|o| o.student_rating)
            .collect();
        if rated.is_empty() {
            return;
        }
        let sum: u32 = rated.iter().map(|&s| u32::from(s)).sum();
        let avg = (Decimal::from(sum) / Decimal::from(rated.len() as u32))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        self.directory.set_personnel_rating(personnel_id, avg);
    }

    // ------------------------------------------------------------------
    // Read projections (no mutation)
    // ------------------------------------------------------------------

    pub fn order_details(&self, order_id: u64) -> ServiceResult<Order> {
        self.store.get(order_id)
    }

    /// A student's orders, newest first.
    pub fn list_for_student(&self, student_id: u64) -> Vec<Order> {
        let mut orders = self.store.filter(|o| o.student_id == student_id);
        sort_newest_first(&mut orders);
        orders
    }

    /// A personnel's orders, optionally filtered by status, newest first.
    pub fn list_for_personnel(
        &self,
        personnel_id: u64,
        status_filter: Option<OrderStatus>,
    ) -> Vec<Order> {
        let mut orders = self.store.filter(|o| {
            o.personnel_id == Some(personnel_id)
                && status_filter.map_or(true, |s| o.status == s)
        });
        sort_newest_first(&mut orders);
        orders
    }

    /// The all-personnel queue of PENDING orders, newest first.
    pub fn pending_orders(&self) -> Vec<Order> {
        let mut orders = self.store.filter(|o| o.status == OrderStatus::Pending);
        sort_newest_first(&mut orders);
        orders
    }

    /// A personnel's orders between acceptance and completion.
    pub fn in_progress_orders(&self, personnel_id: u64) -> Vec<Order> {
        let mut orders = self.store.filter(|o| {
            o.personnel_id == Some(personnel_id)
                && matches!(
                    o.status,
                    OrderStatus::Accepted
                        | OrderStatus::PendingCollection
                        | OrderStatus::Washing
                        | OrderStatus::Ironing
                )
        });
        sort_newest_first(&mut orders);
        orders
    }

    pub fn completed_orders(&self, personnel_id: u64) -> Vec<Order> {
        self.list_for_personnel(personnel_id, Some(OrderStatus::Done))
    }

    /// Last 10 orders across the campus, newest first.
    pub fn recent_orders(&self) -> Vec<Order> {
        let mut orders = self.store.all();
        sort_newest_first(&mut orders);
        orders.truncate(10);
        orders
    }

    pub fn all_orders(&self) -> Vec<Order> {
        let mut orders = self.store.all();
        sort_newest_first(&mut orders);
        orders
    }

    /// Personnel picker for students, best-rated first.
    pub fn list_personnel(&self) -> Vec<Personnel> {
        self.directory.personnel_by_rating()
    }

    /// Completed count and DONE earnings for one personnel.
    pub fn personnel_stats(&self, personnel_id: u64) -> ServiceResult<PersonnelWorkStats> {
        if !self.directory.has_personnel(personnel_id) {
            return Err(ServiceError::personnel_not_found(personnel_id));
        }
        let done = self
            .store
            .filter(|o| o.personnel_id == Some(personnel_id) && o.status == OrderStatus::Done);
        Ok(PersonnelWorkStats {
            completed_orders: done.len() as u64,
            total_earnings: done.iter().map(|o| o.total_price).sum(),
        })
    }

    /// Orders currently held, without snapshotting them.
    pub fn order_count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Order> {
        self.store.all()
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service_with_student() -> (OrderLifecycleService, u64) {
        let directory = Arc::new(Directory::with_seed_data());
        let student = directory.add_student("Asha Verma", "Hostel A", "101", "9000000001");
        let service = OrderLifecycleService::new(directory, Catalog::default());
        (service, student.id)
    }

    fn draft(student_id: u64) -> OrderDraft {
        OrderDraft {
            student_id,
            personnel_id: 1,
            items: vec![
                DraftItem {
                    item_type: "Shirt".to_string(),
                    quantity: 2,
                },
                DraftItem {
                    item_type: "Towels".to_string(),
                    quantity: 1,
                },
            ],
            service_type: ServiceType::Urgent,
            urgency_days: 1,
            pickup_location: "Hostel A, Room 101".to_string(),
            photo_url: None,
        }
    }

    fn complete(service: &OrderLifecycleService, order_id: u64) {
        service.accept(order_id, 1).unwrap();
        for status in [
            OrderStatus::PendingCollection,
            OrderStatus::Washing,
            OrderStatus::Ironing,
            OrderStatus::Done,
        ] {
            service.advance_status(order_id, status).unwrap();
        }
    }

    #[test]
    fn create_works_against_the_stock_seed_directory() {
        // Exactly the startup wiring: seeded directory, nothing added.
        let service =
            OrderLifecycleService::new(Arc::new(Directory::with_seed_data()), Catalog::default());
        let order = service.create(draft(1)).unwrap();
        assert_eq!(order.student_id, 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(service.order_count(), 1);
    }

    #[test]
    fn create_prices_and_persists_pending() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        // (2*15 + 1*15) * 1.5 = 67.50
        assert_eq!(order.total_price, dec!(67.50));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.personnel_id, Some(1));
        assert_eq!(order.items[0].price_per_item, dec!(15));
        assert_eq!(service.order_details(order.id).unwrap().id, order.id);
    }

    #[test]
    fn create_rejects_empty_items() {
        let (service, student_id) = service_with_student();
        let mut d = draft(student_id);
        d.items.clear();
        assert!(matches!(
            service.create(d),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_zero_quantity() {
        let (service, student_id) = service_with_student();
        let mut d = draft(student_id);
        d.items[0].quantity = 0;
        assert!(matches!(
            service.create(d),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_unknown_item_type() {
        let (service, student_id) = service_with_student();
        let mut d = draft(student_id);
        d.items[0].item_type = "Curtains".to_string();
        assert!(matches!(
            service.create(d),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_inconsistent_urgency() {
        let (service, student_id) = service_with_student();

        let mut d = draft(student_id);
        d.urgency_days = 3; // URGENT needs 1 or 2
        assert!(service.create(d).is_err());

        let mut d = draft(student_id);
        d.service_type = ServiceType::Normal;
        d.urgency_days = 1; // NORMAL implies 3
        assert!(service.create(d).is_err());

        let mut d = draft(student_id);
        d.service_type = ServiceType::Normal;
        d.urgency_days = 3;
        assert!(service.create(d).is_ok());
    }

    #[test]
    fn create_rejects_unknown_personnel() {
        let (service, student_id) = service_with_student();
        let mut d = draft(student_id);
        d.personnel_id = 99;
        assert_eq!(
            service.create(d),
            Err(ServiceError::personnel_not_found(99))
        );
    }

    #[test]
    fn create_rejects_unknown_student() {
        let (service, _) = service_with_student();
        assert_eq!(
            service.create(draft(999)),
            Err(ServiceError::student_not_found(999))
        );
    }

    #[test]
    fn accept_binds_personnel_and_stamps() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        let accepted = service.accept(order.id, 3).unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);
        assert_eq!(accepted.personnel_id, Some(3));
        assert!(accepted.accepted_at.is_some());
        assert!(accepted.updated_at >= order.updated_at);
    }

    #[test]
    fn accept_twice_fails() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        service.accept(order.id, 1).unwrap();
        assert_eq!(
            service.accept(order.id, 2),
            Err(ServiceError::InvalidTransition {
                from: OrderStatus::Accepted,
                to: OrderStatus::Accepted,
            })
        );
    }

    #[test]
    fn reject_requires_reason_and_pending() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();

        assert!(matches!(
            service.reject(order.id, "  "),
            Err(ServiceError::Validation(_))
        ));

        let rejected = service.reject(order.id, "machine breakdown").unwrap();
        assert_eq!(rejected.status, OrderStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("machine breakdown")
        );

        // Terminal: neither reject nor accept may follow.
        assert!(service.reject(order.id, "again").is_err());
        assert!(service.accept(order.id, 1).is_err());
    }

    #[test]
    fn advance_walks_the_chain_and_stamps_stages() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        complete(&service, order.id);
        let done = service.order_details(order.id).unwrap();
        assert_eq!(done.status, OrderStatus::Done);
        assert!(done.collection_at.is_some());
        assert!(done.washing_at.is_some());
        assert!(done.ironing_at.is_some());
        assert!(done.completed_at.is_some());
        assert_eq!(done.status_history().len(), 6);
    }

    #[test]
    fn advance_rejects_skips_and_backward_moves() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        service.accept(order.id, 1).unwrap();

        // Skip
        assert!(service.advance_status(order.id, OrderStatus::Ironing).is_err());
        service
            .advance_status(order.id, OrderStatus::PendingCollection)
            .unwrap();
        service.advance_status(order.id, OrderStatus::Washing).unwrap();
        // Backward
        assert_eq!(
            service.advance_status(order.id, OrderStatus::Accepted),
            Err(ServiceError::InvalidTransition {
                from: OrderStatus::Washing,
                to: OrderStatus::Accepted,
            })
        );
    }

    #[test]
    fn advance_never_reaches_accepted_or_rejected() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        assert!(service.advance_status(order.id, OrderStatus::Accepted).is_err());
        assert!(service.advance_status(order.id, OrderStatus::Rejected).is_err());
    }

    #[test]
    fn advance_unknown_order_is_not_found() {
        let (service, _) = service_with_student();
        assert_eq!(
            service.advance_status(42, OrderStatus::Washing),
            Err(ServiceError::order_not_found(42))
        );
    }

    #[test]
    fn rate_exactly_once_after_done() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();

        // Not DONE yet
        assert!(matches!(
            service.rate(order.id, student_id, 5),
            Err(ServiceError::InvalidTransition { .. })
        ));

        complete(&service, order.id);

        assert!(matches!(
            service.rate(order.id, student_id, 0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.rate(order.id, student_id, 6),
            Err(ServiceError::Validation(_))
        ));
        // Wrong student
        assert!(matches!(
            service.rate(order.id, student_id + 1, 5),
            Err(ServiceError::Validation(_))
        ));

        let rated = service.rate(order.id, student_id, 5).unwrap();
        assert_eq!(rated.student_rating, Some(5));

        assert_eq!(
            service.rate(order.id, student_id, 3),
            Err(ServiceError::AlreadyRated(order.id))
        );
    }

    #[test]
    fn rate_refreshes_personnel_average() {
        let (service, student_id) = service_with_student();

        let first = service.create(draft(student_id)).unwrap();
        complete(&service, first.id);
        service.rate(first.id, student_id, 5).unwrap();
        assert_eq!(service.directory().personnel(1).unwrap().rating, dec!(5));

        let second = service.create(draft(student_id)).unwrap();
        complete(&service, second.id);
        service.rate(second.id, student_id, 2).unwrap();
        assert_eq!(service.directory().personnel(1).unwrap().rating, dec!(3.50));
    }

    #[test]
    fn listings_are_reverse_chronological() {
        let (service, student_id) = service_with_student();
        let a = service.create(draft(student_id)).unwrap();
        let b = service.create(draft(student_id)).unwrap();
        let c = service.create(draft(student_id)).unwrap();

        let listed = service.list_for_student(student_id);
        let ids: Vec<u64> = listed.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        let pending = service.pending_orders();
        assert_eq!(pending.len(), 3);
        assert_eq!(pending[0].id, c.id);
    }

    #[test]
    fn personnel_listing_honors_status_filter() {
        let (service, student_id) = service_with_student();
        let a = service.create(draft(student_id)).unwrap();
        let b = service.create(draft(student_id)).unwrap();
        service.accept(a.id, 2).unwrap();
        service.accept(b.id, 2).unwrap();
        service
            .advance_status(b.id, OrderStatus::PendingCollection)
            .unwrap();

        assert_eq!(service.list_for_personnel(2, None).len(), 2);
        let accepted_only = service.list_for_personnel(2, Some(OrderStatus::Accepted));
        assert_eq!(accepted_only.len(), 1);
        assert_eq!(accepted_only[0].id, a.id);

        let in_progress = service.in_progress_orders(2);
        assert_eq!(in_progress.len(), 2);
        assert!(service.completed_orders(2).is_empty());
    }

    #[test]
    fn personnel_stats_counts_done_only() {
        let (service, student_id) = service_with_student();
        let a = service.create(draft(student_id)).unwrap();
        let b = service.create(draft(student_id)).unwrap();
        complete(&service, a.id);
        service.accept(b.id, 1).unwrap();

        let stats = service.personnel_stats(1).unwrap();
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.total_earnings, dec!(67.50));

        assert_eq!(
            service.personnel_stats(42),
            Err(ServiceError::personnel_not_found(42))
        );
    }

    #[test]
    fn recent_orders_caps_at_ten() {
        let (service, student_id) = service_with_student();
        for _ in 0..12 {
            service.create(draft(student_id)).unwrap();
        }
        assert_eq!(service.recent_orders().len(), 10);
        assert_eq!(service.all_orders().len(), 12);
        assert_eq!(service.order_count(), 12);
    }

    #[test]
    fn concurrent_accept_has_exactly_one_winner() {
        let (service, student_id) = service_with_student();
        let order = service.create(draft(student_id)).unwrap();
        let service = Arc::new(service);

        let handles: Vec<_> = (1..=4u64)
            .map(|personnel_id| {
                let service = service.clone();
                let order_id = order.id;
                std::thread::spawn(move || service.accept(order_id, personnel_id))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        for r in results.iter().filter(|r| r.is_err()) {
            assert!(matches!(
                r,
                Err(ServiceError::InvalidTransition { from: OrderStatus::Accepted, .. })
            ));
        }
    }
}
