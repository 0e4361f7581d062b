//! Admin aggregates - a read-only fold over the order set
//!
//! Grouping and averaging only. Revenue counts DONE orders; rating averages
//! exclude unrated orders rather than treating them as zero. Views are
//! eventually consistent with in-flight transitions.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};
use crate::service::OrderLifecycleService;

/// Campus-wide dashboard numbers.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: u64,
    pub completed_orders: u64,
    pub pending_orders: u64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub hostel_stats: Vec<HostelStats>,
    pub personnel_stats: Vec<PersonnelStats>,
}

/// Per-hostel rollup: order count over all orders, revenue over DONE only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelStats {
    pub hostel_name: String,
    pub order_count: u64,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

/// Per-personnel rollup over DONE orders. `average_rating` is `None` until
/// at least one of their completed orders has been rated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelStats {
    pub name: String,
    pub orders_completed: u64,
    #[schema(value_type = String)]
    pub earnings: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub average_rating: Option<Decimal>,
}

/// Compute the full admin dashboard from a point-in-time order snapshot.
pub fn aggregate_stats(service: &OrderLifecycleService) -> AdminStats {
    let orders = service.snapshot();

    let total_orders = orders.len() as u64;
    let completed_orders = count_status(&orders, OrderStatus::Done);
    let pending_orders = count_status(&orders, OrderStatus::Pending);
    let total_revenue = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Done)
        .map(|o| o.total_price)
        .sum();

    AdminStats {
        total_orders,
        completed_orders,
        pending_orders,
        total_revenue,
        hostel_stats: hostel_rollup(service, &orders),
        personnel_stats: personnel_rollup(service, &orders),
    }
}

fn count_status(orders: &[Order], status: OrderStatus) -> u64 {
    orders.iter().filter(|o| o.status == status).count() as u64
}

fn hostel_rollup(service: &OrderLifecycleService, orders: &[Order]) -> Vec<HostelStats> {
    let mut by_hostel: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
    for order in orders {
        let Some(student) = service.directory().student(order.student_id) else {
            continue;
        };
        let entry = by_hostel.entry(student.hostel).or_default();
        entry.0 += 1;
        if order.status == OrderStatus::Done {
            entry.1 += order.total_price;
        }
    }
    by_hostel
        .into_iter()
        .map(|(hostel_name, (order_count, revenue))| HostelStats {
            hostel_name,
            order_count,
            revenue,
        })
        .collect()
}

fn personnel_rollup(service: &OrderLifecycleService, orders: &[Order]) -> Vec<PersonnelStats> {
    // (done count, earnings, rating sum, rating count) keyed by personnel id
    let mut by_personnel: BTreeMap<u64, (u64, Decimal, u32, u32)> = BTreeMap::new();
    for order in orders {
        if order.status != OrderStatus::Done {
            continue;
        }
        let Some(personnel_id) = order.personnel_id else {
            continue;
        };
        let entry = by_personnel.entry(personnel_id).or_default();
        entry.0 += 1;
        entry.1 += order.total_price;
        if let Some(stars) = order.student_rating {
            entry.2 += u32::from(stars);
            entry.3 += 1;
        }
    }
    by_personnel
        .into_iter()
        .filter_map(|(id, (done, earnings, rating_sum, rating_count))| {
            let personnel = service.directory().personnel(id)?;
            let average_rating = (rating_count > 0).then(|| {
                (Decimal::from(rating_sum) / Decimal::from(rating_count))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            });
            Some(PersonnelStats {
                name: personnel.full_name,
                orders_completed: done,
                earnings,
                average_rating,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::directory::Directory;
    use crate::models::ServiceType;
    use crate::service::{DraftItem, OrderDraft};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn draft(student_id: u64, personnel_id: u64) -> OrderDraft {
        OrderDraft {
            student_id,
            personnel_id,
            items: vec![DraftItem {
                item_type: "Pants".to_string(),
                quantity: 5,
            }],
            service_type: ServiceType::Normal,
            urgency_days: 3,
            pickup_location: "Main gate".to_string(),
            photo_url: None,
        }
    }

    fn complete(service: &OrderLifecycleService, order_id: u64, personnel_id: u64) {
        service.accept(order_id, personnel_id).unwrap();
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
    fn empty_service_has_zero_stats() {
        let service =
            OrderLifecycleService::new(Arc::new(Directory::with_seed_data()), Catalog::default());
        let stats = aggregate_stats(&service);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue, dec!(0));
        assert!(stats.hostel_stats.is_empty());
        assert!(stats.personnel_stats.is_empty());
    }

    #[test]
    fn revenue_counts_done_orders_only() {
        let directory = Arc::new(Directory::with_seed_data());
        let s1 = directory.add_student("Asha Verma", "Hostel A", "101", "9000000001");
        let s2 = directory.add_student("Vikram Rao", "Hostel B", "202", "9000000002");
        let service = OrderLifecycleService::new(directory, Catalog::default());

        // One completed (100.00), one still pending, one rejected
        let done = service.create(draft(s1.id, 1)).unwrap();
        complete(&service, done.id, 1);
        service.create(draft(s1.id, 1)).unwrap();
        let rejected = service.create(draft(s2.id, 2)).unwrap();
        service.reject(rejected.id, "overloaded").unwrap();

        let stats = aggregate_stats(&service);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.total_revenue, dec!(100.00));

        // Hostel A: 2 orders, 100 revenue. Hostel B: 1 order, 0 revenue.
        assert_eq!(
            stats.hostel_stats,
            vec![
                HostelStats {
                    hostel_name: "Hostel A".to_string(),
                    order_count: 2,
                    revenue: dec!(100.00),
                },
                HostelStats {
                    hostel_name: "Hostel B".to_string(),
                    order_count: 1,
                    revenue: dec!(0),
                },
            ]
        );
    }

    #[test]
    fn unrated_orders_are_excluded_from_averages() {
        let directory = Arc::new(Directory::with_seed_data());
        let student = directory.add_student("Asha Verma", "Hostel A", "101", "9000000001");
        let service = OrderLifecycleService::new(directory, Catalog::default());

        let a = service.create(draft(student.id, 1)).unwrap();
        let b = service.create(draft(student.id, 1)).unwrap();
        complete(&service, a.id, 1);
        complete(&service, b.id, 1);
        service.rate(a.id, student.id, 4).unwrap();
        // b stays unrated

        let stats = aggregate_stats(&service);
        let p = &stats.personnel_stats[0];
        assert_eq!(p.orders_completed, 2);
        assert_eq!(p.earnings, dec!(200.00));
        // Average over the one rated order, not (4 + 0) / 2
        assert_eq!(p.average_rating, Some(dec!(4)));
    }

    #[test]
    fn personnel_with_no_rated_orders_has_no_average() {
        let directory = Arc::new(Directory::with_seed_data());
        let student = directory.add_student("Asha Verma", "Hostel A", "101", "9000000001");
        let service = OrderLifecycleService::new(directory, Catalog::default());

        let a = service.create(draft(student.id, 2)).unwrap();
        complete(&service, a.id, 2);

        let stats = aggregate_stats(&service);
        assert_eq!(stats.personnel_stats[0].average_rating, None);
    }
}
