//! Per-weekday slices of the quantity matrix

use chrono::Weekday;
use sales_ledger::{DateLabel, MatrixRow, QuantityMatrix};

/// One item's quantities on one weekday, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdaySeries {
    pub item: String,
    pub weekday: Weekday,
    pub labels: Vec<DateLabel>,
    pub quantities: Vec<f64>,
}

impl WeekdaySeries {
    /// Select the row's cells for the weekday's columns, in matrix order
    pub fn extract(matrix: &QuantityMatrix, row: &MatrixRow, weekday: Weekday) -> Self {
        let columns = matrix.columns_for(weekday);
        let labels = columns.iter().map(|&c| matrix.columns()[c]).collect();
        let quantities = columns.iter().map(|&c| row.quantities[c]).collect();

        Self {
            item: row.item.clone(),
            weekday,
            labels,
            quantities,
        }
    }

    /// The `M/D` labels, used as forecast input dates
    pub fn month_days(&self) -> Vec<String> {
        self.labels.iter().map(DateLabel::month_day).collect()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_one_weekday() {
        let labels: Vec<DateLabel> = ["3/4 - Tuesday", "3/11 - Tuesday", "3/5 - Wednesday"]
            .iter()
            .map(|l| l.parse().unwrap())
            .collect();
        let row = MatrixRow {
            item: "Baguette".to_string(),
            quantities: vec![1.0, 2.0, 3.0],
        };
        let matrix = QuantityMatrix::new(labels, vec![row.clone()]).unwrap();

        let tuesdays = WeekdaySeries::extract(&matrix, &row, Weekday::Tue);
        assert_eq!(tuesdays.quantities, vec![1.0, 2.0]);
        assert_eq!(tuesdays.month_days(), vec!["3/4", "3/11"]);

        let sundays = WeekdaySeries::extract(&matrix, &row, Weekday::Sun);
        assert!(sundays.is_empty());
    }
}
