mod subset;
pub use subset::SubsetConstruction;

mod quotient;
pub use quotient::Quotient;

mod flatten;
pub(crate) use flatten::UniqueNames;
