//! Shader stages, programs and uniforms.

use crate::gl33::{state::GLState, GL33};
use gl::types::*;
use std::{cell::RefCell, error, ffi::CString, fmt, marker::PhantomData, ptr::null, rc::Rc};

/// Size of the buffer used to retrieve compilation and link logs.
///
/// Longer logs are truncated.
pub const INFO_LOG_CAPACITY: usize = 512;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// The driver refused to create a stage object.
  CreationFailed(StageType),
  /// Occurs when a shader fails to compile. Carries the driver’s compilation log.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Driver diagnostic attached to the error, if any.
  pub fn log(&self) -> Option<&str> {
    match self {
      StageError::CompilationFailed(_, log) => Some(log),
      _ => None,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CreationFailed(ref ty) => write!(f, "cannot create {}", ty),
      StageError::CompilationFailed(ref ty, ref log) => {
        write!(f, "{} compilation error: {}", ty, log)
      }
    }
  }
}

impl error::Error for StageError {}

/// Errors that a shader program can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// One of the stages failed.
  StageError(StageError),
  /// Program link failed. Carries the driver’s link log.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref log) => write!(f, "shader program failed to link: {}", log),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Warnings related to uniform issues.
///
/// A warning doesn’t prevent the program from being used; the uniform is just ignored.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// Inactive uniform (not in use / no participation to the final output in shaders).
  Inactive(String),
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::Inactive(ref name) => write!(f, "inactive {} uniform", name),
    }
  }
}

impl error::Error for UniformWarning {}

/// A compiled shader stage.
///
/// Stages are only needed until the program they belong to is linked.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

/// A linked shader program.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unuse_program(self.handle);
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log = [0u8; INFO_LOG_CAPACITY];
        let mut log_len: GLsizei = 0;
        gl::GetProgramInfoLog(
          handle,
          INFO_LOG_CAPACITY as GLsizei,
          &mut log_len,
          log.as_mut_ptr() as *mut GLchar,
        );

        Err(ProgramError::LinkFailed(info_log_from_bytes(
          &log[..log_len.max(0) as usize],
        )))
      }
    }
  }

  /// Look up a uniform by name.
  pub fn ask_uniform<T>(&self, name: &str) -> Result<Uniform<T>, UniformWarning>
  where
    T: Uniformable,
  {
    let c_name =
      CString::new(name.as_bytes()).map_err(|_| UniformWarning::Inactive(name.to_owned()))?;
    let location = unsafe { gl::GetUniformLocation(self.handle, c_name.as_ptr()) };

    if location < 0 {
      Err(UniformWarning::Inactive(name.to_owned()))
    } else {
      Ok(Uniform::new(location))
    }
  }

  /// Look up a uniform by name, falling back to an unbound uniform and logging a warning if the
  /// uniform is not active.
  pub fn ask_uniform_or_unbound<T>(&self, name: &str) -> Uniform<T>
  where
    T: Uniformable,
  {
    self.ask_uniform(name).unwrap_or_else(|warning| {
      log::warn!("{}", warning);
      Uniform::unbound()
    })
  }

  /// Set a uniform value.
  ///
  /// The program is made current if it is not already.
  pub fn set<T>(&mut self, uniform: &Uniform<T>, value: T)
  where
    T: Uniformable,
  {
    if uniform.location < 0 {
      return;
    }

    unsafe {
      self.state.borrow_mut().use_program(self.handle);
      value.update(uniform.location);
    }
  }
}

/// A shader uniform location, typed with the value it accepts.
#[derive(Debug)]
pub struct Uniform<T> {
  location: GLint,
  _t: PhantomData<*const T>,
}

impl<T> Uniform<T> {
  fn new(location: GLint) -> Self {
    Uniform {
      location,
      _t: PhantomData,
    }
  }

  /// A uniform that ignores every update.
  pub fn unbound() -> Self {
    Self::new(-1)
  }

  /// Location of the uniform in its program; `-1` when unbound.
  pub fn location(&self) -> GLint {
    self.location
  }
}

/// Types that can be sent to a uniform.
pub trait Uniformable {
  /// Upload the value to the uniform at `location` of the current program.
  ///
  /// # Unsafety
  ///
  /// The program owning `location` must be the current one.
  unsafe fn update(self, location: GLint);
}

impl Uniformable for f32 {
  unsafe fn update(self, location: GLint) {
    gl::Uniform1f(location, self);
  }
}

impl Uniformable for [f32; 2] {
  unsafe fn update(self, location: GLint) {
    gl::Uniform2fv(location, 1, self.as_ptr());
  }
}

impl Uniformable for [f32; 3] {
  unsafe fn update(self, location: GLint) {
    gl::Uniform3fv(location, 1, self.as_ptr());
  }
}

impl GL33 {
  /// Compile a shader stage.
  pub fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Stage, StageError> {
    let c_src = CString::new(src.as_bytes()).map_err(|_| {
      StageError::CompilationFailed(ty, "shader source contains a NUL byte".to_owned())
    })?;

    unsafe {
      let handle = gl::CreateShader(opengl_shader_type(ty));

      if handle == 0 {
        return Err(StageError::CreationFailed(ty));
      }

      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        Ok(Stage { handle })
      } else {
        let mut log = [0u8; INFO_LOG_CAPACITY];
        let mut log_len: GLsizei = 0;
        gl::GetShaderInfoLog(
          handle,
          INFO_LOG_CAPACITY as GLsizei,
          &mut log_len,
          log.as_mut_ptr() as *mut GLchar,
        );

        gl::DeleteShader(handle);

        Err(StageError::CompilationFailed(
          ty,
          info_log_from_bytes(&log[..log_len.max(0) as usize]),
        ))
      }
    }
  }

  /// Link a vertex and a fragment stage into a program.
  pub fn new_program(&mut self, vertex: &Stage, fragment: &Stage) -> Result<Program, ProgramError> {
    let program = unsafe {
      let handle = gl::CreateProgram();

      gl::AttachShader(handle, vertex.handle);
      gl::AttachShader(handle, fragment.handle);

      Program {
        handle,
        state: self.state.clone(),
      }
    };

    program.link().map(move |_| program)
  }

  /// Compile both stages from sources and link them.
  ///
  /// The stages are deleted once the program is linked.
  pub fn new_program_from_strings(
    &mut self,
    vertex_src: &str,
    fragment_src: &str,
  ) -> Result<Program, ProgramError> {
    let vertex = self.new_stage(StageType::VertexShader, vertex_src)?;
    let fragment = self.new_stage(StageType::FragmentShader, fragment_src)?;

    self.new_program(&vertex, &fragment)
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

/// Turn a raw driver log into a string.
///
/// The log stops at the first NUL byte and at [`INFO_LOG_CAPACITY`] bytes; trailing whitespace is
/// removed.
pub(crate) fn info_log_from_bytes(bytes: &[u8]) -> String {
  let bytes = &bytes[..bytes.len().min(INFO_LOG_CAPACITY)];
  let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());

  String::from_utf8_lossy(&bytes[..end]).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn info_log_stops_at_nul() {
    let raw = b"0:3(1): error: syntax error\n\0garbage";
    assert_eq!(info_log_from_bytes(raw), "0:3(1): error: syntax error");
  }

  #[test]
  fn info_log_is_capped() {
    let raw = vec![b'x'; INFO_LOG_CAPACITY + 100];
    assert_eq!(info_log_from_bytes(&raw).len(), INFO_LOG_CAPACITY);
  }

  #[test]
  fn info_log_tolerates_invalid_utf8() {
    let raw = [b'e', b'r', 0xff, b'r'];
    let log = info_log_from_bytes(&raw);

    assert!(log.starts_with("er"));
    assert!(log.ends_with('r'));
  }

  #[test]
  fn stage_error_carries_log() {
    let err = StageError::CompilationFailed(StageType::VertexShader, "bad token".to_owned());

    assert_eq!(err.log(), Some("bad token"));
    assert_eq!(err.to_string(), "vertex shader compilation error: bad token");
    assert_eq!(StageError::CreationFailed(StageType::FragmentShader).log(), None);
  }

  #[test]
  fn program_error_wraps_stage_error() {
    let stage = StageError::CreationFailed(StageType::FragmentShader);
    let err = ProgramError::from(stage.clone());

    assert_eq!(err, ProgramError::StageError(stage));
    assert_eq!(
      err.to_string(),
      "shader program has stage error: cannot create fragment shader"
    );
    assert!(error::Error::source(&err).is_some());
  }

  #[test]
  fn unbound_uniform_location() {
    let uniform: Uniform<f32> = Uniform::unbound();
    assert_eq!(uniform.location(), -1);
  }
}
