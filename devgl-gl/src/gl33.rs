//! OpenGL 3.3 backend.
//!
//! This module implements a thin OpenGL 3.3 layer. The entry point is [`GL33`], acquired once the
//! GL function pointers are loaded for the current context.

mod buffer;
mod shader;
mod state;
mod vertex_array;

pub use self::buffer::{Buffer, BufferError};
pub use self::shader::{
  Program, ProgramError, Stage, StageError, StageType, Uniform, UniformWarning, Uniformable,
  INFO_LOG_CAPACITY,
};
pub use self::state::{GLState, PolygonMode, StateQueryError};
pub use self::vertex_array::{
  Mode, Vertex, VertexArray, VertexArrayError, VertexAttribDesc, VertexAttribDim,
};
use self::state::Bind;
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// Every GPU resource created through it keeps a handle on the shared state so that it can clean
/// its bindings up when dropped.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// The GL function pointers must have been loaded and a context must be current on this thread.
  /// Only one backend can be created per thread.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Set the color used to clear the color buffer.
  pub fn set_clear_color(&mut self, rgba: [f32; 4]) {
    unsafe { self.state.borrow_mut().set_clear_color(rgba) }
  }

  /// Clear the color buffer of the current framebuffer.
  pub fn clear(&mut self) {
    unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
  }

  /// Set the viewport to cover a `width`×`height` framebuffer.
  pub fn set_viewport(&mut self, width: u32, height: u32) {
    let viewport = [0, 0, width as GLint, height as GLint];
    unsafe { self.state.borrow_mut().set_viewport(viewport) }
  }

  /// Select how front and back facing polygons are rasterized.
  pub fn set_polygon_mode(&mut self, mode: PolygonMode) {
    unsafe { self.state.borrow_mut().set_polygon_mode(mode) }
  }

  /// Draw all the vertices of a vertex array with a program.
  pub fn render<V>(&mut self, program: &Program, vertex_array: &VertexArray<V>) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.use_program(program.handle());
      state.bind_vertex_array(vertex_array.handle(), Bind::Cached);
      gl::DrawArrays(
        vertex_array::opengl_mode(vertex_array.mode()),
        0,
        vertex_array.vert_nb() as GLsizei,
      );
    }
  }
}
