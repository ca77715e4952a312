//! Window options.

/// Different window options.
///
/// Windows are always opened in windowed mode with a fixed resolution. You may want to start with
/// `default()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: [u32; 2],
}

impl Default for WindowOpt {
  /// Defaults to a 640×480 window.
  fn default() -> Self {
    WindowOpt { dim: [640, 480] }
  }
}

impl WindowOpt {
  /// Set the dimension of the window, as `[width, height]`.
  #[inline]
  pub fn set_dim(self, dim: [u32; 2]) -> Self {
    WindowOpt { dim }
  }

  /// Get the dimension of the window, as `[width, height]`.
  #[inline]
  pub fn dim(&self) -> [u32; 2] {
    self.dim
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_options() {
    assert_eq!(WindowOpt::default().dim(), [640, 480]);
  }

  #[test]
  fn set_dim() {
    let opt = WindowOpt::default().set_dim([800, 600]);
    assert_eq!(opt.dim(), [800, 600]);
  }
}
