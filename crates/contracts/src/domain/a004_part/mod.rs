pub mod aggregate;
pub mod stock;

pub use aggregate::{
    AdjustStockRequest, Part, PartDto, PartId, PartPatch, PartStatus, MAX_STOCK_DELTA,
};
pub use stock::{low_stock, StockLevel};
