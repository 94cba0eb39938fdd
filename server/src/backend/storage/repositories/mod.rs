pub mod bill_repository;
pub mod budget_repository;
pub mod pot_repository;
pub mod transaction_repository;

pub use bill_repository::BillRepository;
pub use budget_repository::BudgetRepository;
pub use pot_repository::PotRepository;
pub use transaction_repository::TransactionRepository;
