//! Vertex arrays: a vertex buffer plus the description of its attributes.

use crate::gl33::{
  buffer::{Buffer, BufferError},
  state::{Bind, GLState},
  GL33,
};
use gl::types::*;
use std::{cell::RefCell, error, fmt, mem, rc::Rc};

/// Dimension of a vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexAttribDim {
  Dim2,
  Dim3,
}

impl VertexAttribDim {
  fn size(self) -> GLint {
    match self {
      VertexAttribDim::Dim2 => 2,
      VertexAttribDim::Dim3 => 3,
    }
  }
}

/// Description of a single floating-point vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribDesc {
  /// Attribute location, as declared with `layout(location = …)` in the vertex shader.
  pub index: GLuint,
  /// Number of components.
  pub dim: VertexAttribDim,
}

impl VertexAttribDesc {
  /// A `f32` attribute of the given dimension bound at `index`.
  pub const fn new(index: GLuint, dim: VertexAttribDim) -> Self {
    VertexAttribDesc { index, dim }
  }

  // weight in bytes
  fn weight(&self) -> usize {
    self.dim.size() as usize * mem::size_of::<GLfloat>()
  }
}

/// Interleaved vertex types.
///
/// The attributes must be listed in the same order as the fields of the `#[repr(C)]` type.
pub trait Vertex: Copy {
  /// Attribute layout of the vertex.
  const ATTRIBS: &'static [VertexAttribDesc];
}

/// Vertices primitive mode.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// Every three vertices form a triangle.
  Triangle,
}

pub(crate) fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Triangle => gl::TRIANGLES,
  }
}

/// Vertex array creation errors.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The vertex buffer could not be created.
  Buffer(BufferError),
  /// The driver could not allocate a vertex array object.
  CannotCreate,
  /// The vertex type does not match its attribute description.
  LayoutMismatch {
    /// Size of the vertex type, in bytes.
    vertex_size: usize,
    /// Size described by the attributes, in bytes.
    attribs_size: usize,
  },
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::Buffer(ref e) => write!(f, "vertex buffer error: {}", e),
      VertexArrayError::CannotCreate => f.write_str("cannot create vertex array"),
      VertexArrayError::LayoutMismatch {
        vertex_size,
        attribs_size,
      } => write!(
        f,
        "vertex is {} bytes but its attributes describe {} bytes",
        vertex_size, attribs_size
      ),
    }
  }
}

impl error::Error for VertexArrayError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      VertexArrayError::Buffer(e) => Some(e),
      _ => None,
    }
  }
}

impl From<BufferError> for VertexArrayError {
  fn from(e: BufferError) -> Self {
    VertexArrayError::Buffer(e)
  }
}

/// A vertex array object owning its vertex buffer.
#[derive(Debug)]
pub struct VertexArray<V> {
  handle: GLuint,
  mode: Mode,
  // kept alive for as long as the vertex array references it
  buffer: Buffer<V>,
  state: Rc<RefCell<GLState>>,
}

impl<V> Drop for VertexArray<V> {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_vertex_array(self.handle);
      gl::DeleteVertexArrays(1, &self.handle);
    }
  }
}

impl<V> VertexArray<V> {
  /// Number of vertices.
  pub fn vert_nb(&self) -> usize {
    self.buffer.len()
  }

  /// Primitive mode used to render the vertices.
  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }
}

impl GL33 {
  /// Upload vertices and describe their attributes in a new vertex array.
  pub fn new_vertex_array<V>(
    &mut self,
    vertices: &[V],
    mode: Mode,
  ) -> Result<VertexArray<V>, VertexArrayError>
  where
    V: Vertex,
  {
    let offsets = attrib_offsets(V::ATTRIBS);
    let attribs_size = vertex_weight(V::ATTRIBS, &offsets);
    let vertex_size = mem::size_of::<V>();

    if attribs_size != vertex_size {
      return Err(VertexArrayError::LayoutMismatch {
        vertex_size,
        attribs_size,
      });
    }

    let mut handle: GLuint = 0;

    unsafe {
      gl::GenVertexArrays(1, &mut handle);

      if handle == 0 {
        return Err(VertexArrayError::CannotCreate);
      }

      // force binding the vertex array so that previously bound vertex arrays (possibly the same
      // handle) don’t prevent us from binding here
      self
        .state
        .borrow_mut()
        .bind_vertex_array(handle, Bind::Forced);
    }

    let buffer = match self.new_buffer(vertices) {
      Ok(buffer) => buffer,
      Err(e) => {
        unsafe {
          self.state.borrow_mut().unbind_vertex_array(handle);
          gl::DeleteVertexArrays(1, &handle);
        }

        return Err(e.into());
      }
    };

    unsafe {
      // force binding as it’s meaningful when a vao is bound
      self
        .state
        .borrow_mut()
        .bind_array_buffer(buffer.handle(), Bind::Forced);
      set_vertex_pointers(V::ATTRIBS, &offsets, vertex_size as GLsizei);
    }

    Ok(VertexArray {
      handle,
      mode,
      buffer,
      state: self.state.clone(),
    })
  }
}

// Offsets of all the attributes, in order.
fn attrib_offsets(attribs: &[VertexAttribDesc]) -> Vec<usize> {
  let mut offsets = Vec::with_capacity(attribs.len());
  let mut off = 0;

  for desc in attribs {
    offsets.push(off);
    off += desc.weight();
  }

  offsets
}

// Weight in bytes of a single vertex.
fn vertex_weight(attribs: &[VertexAttribDesc], offsets: &[usize]) -> usize {
  match (attribs.last(), offsets.last()) {
    (Some(desc), Some(off)) => off + desc.weight(),
    _ => 0,
  }
}

unsafe fn set_vertex_pointers(attribs: &[VertexAttribDesc], offsets: &[usize], stride: GLsizei) {
  for (desc, off) in attribs.iter().zip(offsets) {
    gl::VertexAttribPointer(
      desc.index,
      desc.dim.size(),
      gl::FLOAT,
      gl::FALSE,
      stride,
      *off as *const _,
    );
    gl::EnableVertexAttribArray(desc.index);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const POS_COLOR: &[VertexAttribDesc] = &[
    VertexAttribDesc::new(0, VertexAttribDim::Dim3),
    VertexAttribDesc::new(1, VertexAttribDim::Dim3),
  ];

  #[test]
  fn interleaved_offsets() {
    let offsets = attrib_offsets(POS_COLOR);

    assert_eq!(offsets, vec![0, 12]);
    assert_eq!(vertex_weight(POS_COLOR, &offsets), 24);
  }

  #[test]
  fn empty_layout_weighs_nothing() {
    let offsets = attrib_offsets(&[]);

    assert!(offsets.is_empty());
    assert_eq!(vertex_weight(&[], &offsets), 0);
  }

  #[test]
  fn modes() {
    assert_eq!(opengl_mode(Mode::Triangle), gl::TRIANGLES);
  }

  #[test]
  fn layout_mismatch_display() {
    let err = VertexArrayError::LayoutMismatch {
      vertex_size: 8,
      attribs_size: 12,
    };

    assert_eq!(
      err.to_string(),
      "vertex is 8 bytes but its attributes describe 12 bytes"
    );
  }
}
