use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width and height as signed pixel counts for toolkit and Cairo APIs.
    pub fn pixel_size(self) -> ChartResult<(i32, i32)> {
        let invalid = || ChartError::InvalidViewport {
            width: self.width,
            height: self.height,
        };
        if !self.is_valid() {
            return Err(invalid());
        }
        let width = i32::try_from(self.width).map_err(|_| invalid())?;
        let height = i32::try_from(self.height).map_err(|_| invalid())?;
        Ok((width, height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(960, 600)
    }
}
