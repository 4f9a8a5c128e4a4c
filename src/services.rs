pub mod aggregation;

pub mod customer_service;
pub use customer_service::CustomerService;
pub mod invoice_service;
pub use invoice_service::InvoiceService;
pub mod product_service;
pub use product_service::ProductService;
pub mod sale_service;
pub use sale_service::SaleService;
pub mod warehouse_service;
pub use warehouse_service::WarehouseService;
