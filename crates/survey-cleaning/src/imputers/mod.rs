//! Missing and invalid value imputation.

mod statistical;

pub use statistical::{RangeRepair, StatisticalImputer};
