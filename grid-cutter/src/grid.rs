use std::fmt;
use std::str::FromStr;

use crate::error::CutError;

/// Traversal order of an `m x n` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Left to right, rows top to bottom
    #[default]
    Horizontal,
    /// Top to bottom, columns right to left
    Vertical,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Horizontal => "horizontal",
            Order::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = CutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Order::Horizontal),
            "vertical" => Ok(Order::Vertical),
            other => Err(CutError::UnknownOrder(other.to_string())),
        }
    }
}

/// Grid cells `(col, row)` of an `m`-column, `n`-row grid in traversal order
pub fn grid_cells(m: u32, n: u32, order: Order) -> Vec<(u32, u32)> {
    let mut cells = Vec::with_capacity(m as usize * n as usize);
    match order {
        Order::Horizontal => {
            for row in 0..n {
                for col in 0..m {
                    cells.push((col, row));
                }
            }
        }
        Order::Vertical => {
            for col in (0..m).rev() {
                for row in 0..n {
                    cells.push((col, row));
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_cells() {
        assert_eq!(
            grid_cells(3, 2, Order::Horizontal),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_vertical_cells() {
        assert_eq!(
            grid_cells(3, 2, Order::Vertical),
            vec![(2, 0), (2, 1), (1, 0), (1, 1), (0, 0), (0, 1)]
        );
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("vertical".parse::<Order>().unwrap(), Order::Vertical);
        assert_eq!(Order::Horizontal.to_string(), "horizontal");
        assert!(matches!(
            "diagonal".parse::<Order>(),
            Err(CutError::UnknownOrder(s)) if s == "diagonal"
        ));
    }
}
