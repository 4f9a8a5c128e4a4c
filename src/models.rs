pub mod customer;
pub mod invoice;
pub mod product;
pub mod sale;
pub mod warehouse;
