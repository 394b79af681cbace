//! Domain layer - shop entities, pricing and calendar rules.
//!
//! Nothing in here touches the database or HTTP.

pub mod mix;
pub mod oil;
pub mod password;
pub mod period;
pub mod report;
pub mod sale;
pub mod user;

pub use mix::{quote, MixLine, MixQuote, QuotedLine};
pub use oil::{NewOil, Oil, OilChanges, OilResponse, OilStatus, OilUnit};
pub use password::Password;
pub use period::{parse_year_month, DayBounds, LocalRange, MonthBounds, UtcRange};
pub use report::{DailyReport, MonthlyReport, MonthlySalesSummary, OilRevenue, SalesTotals};
pub use sale::{NewSale, NewSaleItem, Sale, SaleType, SnapshotItem};
pub use user::{User, UserResponse, UserRole};
