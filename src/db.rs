pub mod contracts;
pub use contracts::{
    CustomerRepository, InvoiceRepository, ProductRepository, SaleRepository, WarehouseRepository,
};

pub mod customer_repo;
pub use customer_repo::PgCustomerRepository;
pub mod invoice_repo;
pub use invoice_repo::PgInvoiceRepository;
pub mod product_repo;
pub use product_repo::PgProductRepository;
pub mod sale_repo;
pub use sale_repo::PgSaleRepository;
pub mod warehouse_repo;
pub use warehouse_repo::PgWarehouseRepository;

pub mod memory;
pub use memory::MemoryStore;
