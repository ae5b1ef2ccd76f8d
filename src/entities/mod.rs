//! Entity module - Plain data records stored in the ledger document.
//! Every record serializes with camelCase keys, the shape used by the data file
//! and by the HTTP API alike.

pub mod daily_record;
pub mod employee;
pub mod expense;
pub mod product;
pub mod sales_record;

pub use daily_record::{
    DailyRecord, DailyStockEntry, EmptyInventory, FullInventory, Inventory, StockEntry,
};
pub use employee::{Employee, EmployeePatch, EmployeeStatus, NewEmployee};
pub use expense::{Expense, ExpensePatch, NewExpense};
pub use product::Product;
pub use sales_record::{EmployeeSales, PaymentEntry, SalesEntry, SalesRecord};
