//! OpenGL buffer implementation.

use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use std::{cell::RefCell, error, fmt, mem, rc::Rc};

/// Buffer creation errors.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum BufferError {
  /// The driver could not allocate a buffer object.
  CannotCreate,
  /// The data does not fit the buffer size type.
  TooLarge(usize),
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferError::CannotCreate => f.write_str("cannot create buffer"),
      BufferError::TooLarge(bytes) => write!(f, "buffer too large ({} bytes)", bytes),
    }
  }
}

impl error::Error for BufferError {}

/// Wrapped OpenGL buffer.
///
/// Used to drop the buffer.
#[derive(Debug)]
struct BufferWrapper {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for BufferWrapper {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_buffer(self.handle);
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

/// Immutable GPU vertex buffer.
///
/// The data is uploaded once at creation and never read back.
#[derive(Debug)]
pub struct Buffer<T> {
  len: usize,
  gl_buf: BufferWrapper,
  _t: std::marker::PhantomData<T>,
}

impl<T> Buffer<T>
where
  T: Copy,
{
  pub(crate) fn from_slice(gl33: &mut GL33, data: &[T]) -> Result<Self, BufferError> {
    let bytes = mem::size_of::<T>() * data.len();
    let size = GLsizeiptr::try_from(bytes).map_err(|_| BufferError::TooLarge(bytes))?;
    let mut handle: GLuint = 0;

    unsafe {
      gl::GenBuffers(1, &mut handle);

      if handle == 0 {
        return Err(BufferError::CannotCreate);
      }

      gl33
        .state
        .borrow_mut()
        .bind_array_buffer(handle, Bind::Forced);

      gl::BufferData(gl::ARRAY_BUFFER, size, data.as_ptr() as _, gl::STATIC_DRAW);
    }

    let state = gl33.state.clone();
    let gl_buf = BufferWrapper { handle, state };

    Ok(Buffer {
      len: data.len(),
      gl_buf,
      _t: std::marker::PhantomData,
    })
  }
}

impl<T> Buffer<T> {
  pub(crate) fn handle(&self) -> GLuint {
    self.gl_buf.handle
  }

  /// Length of the buffer (number of elements).
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether the buffer holds no element.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl GL33 {
  /// Upload a slice into a new static array buffer.
  pub fn new_buffer<T>(&mut self, data: &[T]) -> Result<Buffer<T>, BufferError>
  where
    T: Copy,
  {
    Buffer::from_slice(self, data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buffer_error_display() {
    assert_eq!(BufferError::CannotCreate.to_string(), "cannot create buffer");
    assert_eq!(
      BufferError::TooLarge(12).to_string(),
      "buffer too large (12 bytes)"
    );
  }
}
