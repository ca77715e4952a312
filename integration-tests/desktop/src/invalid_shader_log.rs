use colored::Colorize as _;
use devgl_gl::gl33::{ProgramError, StageError, StageType};
use devgl_glfw::{GlfwSurface, WindowOpt};

const INVALID_VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(oops, 1.); }\n";

const VALID_FS: &str = "#version 330 core\nout vec4 frag;\nvoid main() { frag = vec4(1.); }\n";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Invalid shader log", WindowOpt::default()).unwrap();
  let gl = surface.context.backend();

  match gl.new_stage(StageType::VertexShader, INVALID_VS) {
    Err(StageError::CompilationFailed(StageType::VertexShader, log)) => {
      assert!(!log.is_empty(), "empty compilation log");
      println!("compilation log: {}", log.yellow());
    }

    other => panic!("unexpected stage result: {:?}", other),
  }

  match gl.new_program_from_strings(INVALID_VS, VALID_FS) {
    Err(ProgramError::StageError(e)) => assert!(e.log().map_or(false, |log| !log.is_empty())),
    other => panic!("unexpected program result: {:?}", other.map(|_| ())),
  }

  // the process is still alive and the context still usable
  assert!(gl
    .new_stage(StageType::FragmentShader, VALID_FS)
    .is_ok());

  println!("{}", "ok".green());
}
