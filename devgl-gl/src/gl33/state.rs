//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set. The cache is only as good as the knowledge we have of the
/// context: a non-cached value (i.e. empty) always triggers the command.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// How polygons get rasterized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolygonMode {
  /// Fill the interior of the polygon.
  Fill,
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. It forwards to the OpenGL
/// API but adds a small cache layer over it to prevent from issuing the same API call (with the
/// same parameters) twice in a row.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  viewport: Cached<[GLint; 4]>,
  clear_color: Cached<[GLfloat; 4]>,
  polygon_mode: Cached<PolygonMode>,
  bound_array_buffer: GLuint,
  bound_vertex_array: GLuint,
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: only one state can be acquired per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport());
      let clear_color = Cached::new(get_ctx_clear_color());
      // fill is the default for a freshly created context
      let polygon_mode = Cached::new(PolygonMode::Fill);
      let bound_array_buffer = get_ctx_bound_array_buffer();
      let bound_vertex_array = get_ctx_bound_vertex_array();
      let current_program = get_ctx_current_program();

      Ok(GLState {
        _a: PhantomData,
        viewport,
        clear_color,
        polygon_mode,
        bound_array_buffer,
        bound_vertex_array,
        current_program,
      })
    }
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) {
    if self.polygon_mode.is_invalid(&mode) {
      gl::PolygonMode(gl::FRONT_AND_BACK, polygon_mode_to_glenum(mode));
      self.polygon_mode.set(mode);
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bind_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.bind_vertex_array(0, Bind::Cached)
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  pub(crate) unsafe fn unuse_program(&mut self, handle: GLuint) {
    if self.current_program == handle {
      self.use_program(0);
    }
  }
}

/// Should the binding be cached or forced to the provided value?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if you try to have more than one state on the same thread.
  UnavailableGLState,
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
    }
  }
}

impl error::Error for StateQueryError {}

fn polygon_mode_to_glenum(mode: PolygonMode) -> GLenum {
  match mode {
    PolygonMode::Fill => gl::FILL,
  }
}

unsafe fn get_ctx_viewport() -> [GLint; 4] {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_clear_color() -> [GLfloat; 4] {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_bound_array_buffer() -> GLuint {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::ARRAY_BUFFER_BINDING, &mut bound);
  bound as GLuint
}

unsafe fn get_ctx_bound_vertex_array() -> GLuint {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  bound as GLuint
}

unsafe fn get_ctx_current_program() -> GLuint {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  used as GLuint
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_value_invalidation() {
    let mut cached = Cached::new([0., 0., 0., 1.]);

    assert!(!cached.is_invalid(&[0., 0., 0., 1.]));
    assert!(cached.is_invalid(&[1., 0., 0., 1.]));

    cached.set([1., 0., 0., 1.]);
    assert!(!cached.is_invalid(&[1., 0., 0., 1.]));
  }

  #[test]
  fn empty_cache_is_always_invalid() {
    let cached: Cached<PolygonMode> = Cached(None);

    assert!(cached.is_invalid(&PolygonMode::Fill));
  }

  #[test]
  fn polygon_modes() {
    assert_eq!(polygon_mode_to_glenum(PolygonMode::Fill), gl::FILL);
  }

  #[test]
  fn state_query_error_display() {
    assert_eq!(
      StateQueryError::UnavailableGLState.to_string(),
      "unavailable graphics state"
    );
  }
}
