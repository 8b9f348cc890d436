use crate::error::Result;
use crate::icondir::MAX_SIZE;
use crate::resample::Filter;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// A single 256x256 PNG-embedded image.
const DEFAULT_SIZES: &[u32] = &[256];

//===========================================================================//

/// Settings for one conversion into an ICO file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IconOptions {
    /// Side lengths of the square images to embed, in directory order.
    /// Each must be between 1 and 256.
    pub sizes: Vec<u32>,
    /// The interpolation filter used to produce each size.
    pub filter: Filter,
}

impl Default for IconOptions {
    fn default() -> IconOptions {
        IconOptions {
            sizes: DEFAULT_SIZES.to_vec(),
            filter: Filter::default(),
        }
    }
}

impl IconOptions {
    /// Returns these options with the list of sizes replaced.
    pub fn with_sizes<I>(mut self, sizes: I) -> IconOptions
    where
        I: IntoIterator<Item = u32>,
    {
        self.sizes = sizes.into_iter().collect();
        self
    }

    /// Returns these options with the filter replaced.
    pub fn with_filter(mut self, filter: Filter) -> IconOptions {
        self.filter = filter;
        self
    }

    /// Checks that every size fits an ICO directory entry and that the
    /// header can count them.  An empty list is allowed and produces a
    /// header-only file.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many icon sizes (was {}, but max is {})",
                self.sizes.len(),
                u16::MAX
            );
        }
        for &size in self.sizes.iter() {
            if size == 0 || size > MAX_SIZE {
                invalid_input!(
                    "Unsupported icon size {} (must be between 1 and {})",
                    size,
                    MAX_SIZE
                );
            }
        }
        Ok(())
    }
}

//===========================================================================//


//===========================================================================//
