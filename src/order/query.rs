//! Order overview query
//!
//! Builds the descriptor for a customer's order listing: pinned to the
//! caller, newest first, one page at a time, with a next-pages estimate
//! instead of an exact count.

use crate::account::AccountError;
use crate::criteria::{Criteria, FieldSorting, Filter, Pagination, TotalCountMode};
use crate::session::CustomerContext;

use super::models::OrderField;

/// Build the order listing query for the logged-in customer.
///
/// Fails with [`AccountError::Unauthenticated`] when the context carries no
/// customer; no descriptor is built in that case.
pub fn build_order_query(
    context: &CustomerContext,
    pagination: Pagination,
) -> Result<Criteria<OrderField>, AccountError> {
    let customer_id = context.require_customer()?;

    Ok(Criteria::new(pagination)
        .with_filter(Filter::equals(OrderField::CustomerId, customer_id.as_uuid()))
        .with_sorting(FieldSorting::descending(OrderField::OrderDate))
        .with_total_count_mode(TotalCountMode::NextPages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{CustomerId, SessionId};
    use crate::criteria::{FilterValue, SortDirection, sql};

    fn logged_in(customer_id: CustomerId) -> CustomerContext {
        CustomerContext::authenticated(SessionId::new(), customer_id)
    }

    #[test]
    fn test_defaults_yield_first_page_of_ten() {
        let criteria = build_order_query(&logged_in(CustomerId::new()), Pagination::default()).unwrap();
        assert_eq!(criteria.offset(), 0);
        assert_eq!(criteria.limit(), 10);
    }

    #[test]
    fn test_page_three_of_five() {
        let criteria =
            build_order_query(&logged_in(CustomerId::new()), Pagination::new(3, 5).unwrap()).unwrap();
        assert_eq!(criteria.offset(), 10);
        assert_eq!(criteria.limit(), 5);
    }

    #[test]
    fn test_offset_and_limit_for_all_small_inputs() {
        let ctx = logged_in(CustomerId::new());
        for page in 1..=12u32 {
            for limit in 1..=12u32 {
                let criteria = build_order_query(&ctx, Pagination::new(page, limit).unwrap()).unwrap();
                assert_eq!(criteria.offset(), ((page - 1) * limit) as u64);
                assert_eq!(criteria.limit(), limit);
            }
        }
    }

    #[test]
    fn test_filter_pins_customer() {
        let customer_id = CustomerId::new();
        let criteria = build_order_query(&logged_in(customer_id), Pagination::default()).unwrap();
        assert_eq!(
            criteria.filters(),
            &[Filter::Equals {
                field: OrderField::CustomerId,
                value: FilterValue::Uuid(customer_id.as_uuid()),
            }]
        );
    }

    #[test]
    fn test_changing_identity_only_changes_filter_value() {
        let pagination = Pagination::new(2, 7).unwrap();
        let a = build_order_query(&logged_in(CustomerId::new()), pagination).unwrap();
        let b = build_order_query(&logged_in(CustomerId::new()), pagination).unwrap();
        assert_ne!(a.filters(), b.filters());
        assert_eq!(a.sorting(), b.sorting());
        assert_eq!(a.pagination(), b.pagination());
        assert_eq!(a.total_count_mode(), b.total_count_mode());
        assert_eq!(a.filters()[0].field(), b.filters()[0].field());
    }

    #[test]
    fn test_sort_is_always_order_date_descending() {
        for (page, limit) in [(1, 1), (4, 25), (100, 3)] {
            let criteria = build_order_query(
                &logged_in(CustomerId::new()),
                Pagination::new(page, limit).unwrap(),
            )
            .unwrap();
            assert_eq!(criteria.sorting().len(), 1);
            assert_eq!(criteria.sorting()[0].field, OrderField::OrderDate);
            assert_eq!(criteria.sorting()[0].direction, SortDirection::Descending);
        }
    }

    #[test]
    fn test_counts_next_pages_only() {
        let criteria = build_order_query(&logged_in(CustomerId::new()), Pagination::default()).unwrap();
        assert_eq!(criteria.total_count_mode(), TotalCountMode::NextPages);
    }

    #[test]
    fn test_renders_customer_page_sql() {
        let criteria =
            build_order_query(&logged_in(CustomerId::new()), Pagination::new(3, 5).unwrap()).unwrap();

        let ids = sql::select_ids("orders", &criteria);
        assert_eq!(
            ids.sql(),
            "SELECT id FROM orders WHERE customer_id = $1 \
             ORDER BY order_date DESC NULLS LAST, id ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(ids.sql().matches('$').count(), 3);
        // five pages of look-ahead plus one row
        assert_eq!(criteria.fetch_size(), 31);
        assert_eq!(criteria.offset(), 10);

        let count = sql::count("orders", &criteria);
        assert_eq!(count.sql(), "SELECT COUNT(*) FROM orders WHERE customer_id = $1");
    }

    #[test]
    fn test_anonymous_context_is_rejected() {
        let err = build_order_query(&CustomerContext::anonymous(), Pagination::default()).unwrap_err();
        assert!(matches!(err, AccountError::Unauthenticated));
    }
}
