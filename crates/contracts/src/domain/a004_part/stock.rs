use super::aggregate::Part;

/// Уровень складского остатка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    Reorder,
    Ok,
}

impl StockLevel {
    pub fn classify(quantity: u32, minimum: u32, reorder_point: u32) -> Self {
        if quantity == 0 {
            StockLevel::Out
        } else if quantity <= minimum {
            StockLevel::Low
        } else if quantity <= reorder_point {
            StockLevel::Reorder
        } else {
            StockLevel::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Out => "Out of stock",
            StockLevel::Low => "Low stock",
            StockLevel::Reorder => "Reorder",
            StockLevel::Ok => "In stock",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, StockLevel::Out | StockLevel::Low)
    }
}

/// Позиции с остатком на минимуме или ниже
pub fn low_stock(parts: &[Part]) -> Vec<&Part> {
    parts
        .iter()
        .filter(|p| p.stock_level().needs_attention())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(StockLevel::classify(0, 10, 15), StockLevel::Out);
        assert_eq!(StockLevel::classify(10, 10, 15), StockLevel::Low);
        assert_eq!(StockLevel::classify(11, 10, 15), StockLevel::Reorder);
        assert_eq!(StockLevel::classify(15, 10, 15), StockLevel::Reorder);
        assert_eq!(StockLevel::classify(16, 10, 15), StockLevel::Ok);
    }

    #[test]
    fn test_zero_minimum_still_flags_empty_stock() {
        assert_eq!(StockLevel::classify(0, 0, 0), StockLevel::Out);
        assert!(StockLevel::Out.needs_attention());
        assert!(!StockLevel::Reorder.needs_attention());
    }
}
