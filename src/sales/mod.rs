use crate::model::Order;

/// Sum of the orders' totals. Totals that do not parse as a finite number
/// add nothing.
pub fn daily_sales(orders: &[&Order]) -> f64 {
    orders
        .iter()
        .map(|order| match order.total.amount() {
            Some(amount) => amount,
            None => {
                tracing::debug!(
                    order_id = %order.order_id,
                    total = %order.total,
                    "order total is not a number, counted as zero"
                );
                0.0
            }
        })
        .fold(0.0, |sum, amount| sum + amount)
}

/// Two decimal places. Negative zero prints as `0.00`.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, Total};

    fn with_total(total: Total) -> Order {
        Order {
            order_id: "1".to_string(),
            created_at: "2024-05-01T10:00".to_string(),
            order_type: "Dine In".to_string(),
            table_number: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            delivery_address: String::new(),
            items: Vec::new(),
            total,
        }
    }

    #[test]
    fn empty_list_is_zero() {
        let total = daily_sales(&[]);
        assert!(total.is_sign_positive());
        assert_eq!(format_amount(total), "0.00");
    }

    #[test]
    fn negative_zero_formats_unsigned() {
        assert_eq!(format_amount(-0.0), "0.00");
    }

    #[test]
    fn all_bad_totals_sum_to_positive_zero() {
        let orders = [with_total(Total::Missing), with_total(Total::Text("n/a".to_string()))];
        let refs: Vec<&Order> = orders.iter().collect();
        assert!(daily_sales(&refs).is_sign_positive());
        assert_eq!(format_amount(daily_sales(&refs)), "0.00");
    }

    #[test]
    fn mixed_totals_sum_to_two_places() {
        let orders = [
            with_total(Total::Number(10.0)),
            with_total(Total::Text("20.5".to_string())),
            with_total(Total::Text("9.49".to_string())),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        assert_eq!(format_amount(daily_sales(&refs)), "39.99");
    }

    #[test]
    fn unparseable_totals_count_as_zero() {
        let orders = [
            with_total(Total::Text("12".to_string())),
            with_total(Total::Text("twelve".to_string())),
            with_total(Total::Missing),
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        assert_eq!(format_amount(daily_sales(&refs)), "12.00");
    }
}
