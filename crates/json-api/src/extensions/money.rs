//! Money display helpers.

use salvo::prelude::StatusError;

use bitebuddy_app::money::format_inr;

use crate::extensions::*;

pub(crate) trait AmountExt {
    /// Rupee string for a paise amount, e.g. `₹12.60`.
    fn to_inr_or_500(self) -> Result<String, StatusError>;
}

impl AmountExt for u64 {
    fn to_inr_or_500(self) -> Result<String, StatusError> {
        format_inr(self).or_500("amount does not fit a display value")
    }
}
