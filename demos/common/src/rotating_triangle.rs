//! This program shows how to animate a triangle with a shader uniform. The vertex shader rotates
//! every vertex by an angle sent from the CPU each frame; the angle moves by a fixed step per frame
//! rather than with elapsed time.
//!
//! The vertices are interleaved (position then color) and uploaded once.
//!
//! Press <escape> to quit or close the window.

use crate::{handle_resize, Example, ExampleError, InputAction, LoopFeedback};
use cgmath::Deg;
use devgl_gl::{
  gl33::{
    Mode, PolygonMode, Program, Uniform, Vertex as GLVertex, VertexArray, VertexAttribDesc,
    VertexAttribDim,
  },
  GL33,
};

const VS: &str = include_str!("rotating-vs.glsl");
const FS: &str = include_str!("rotating-fs.glsl");

/// Rotation added every frame.
pub const ANGLE_STEP: Deg<f32> = Deg(1.);

/// The angle goes back to zero when it reaches this value.
pub const FULL_TURN: Deg<f32> = Deg(360.);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  pub pos: [f32; 3],
  pub rgb: [f32; 3],
}

impl GLVertex for Vertex {
  const ATTRIBS: &'static [VertexAttribDesc] = &[
    VertexAttribDesc::new(0, VertexAttribDim::Dim3),
    VertexAttribDesc::new(1, VertexAttribDim::Dim3),
  ];
}

#[rustfmt::skip]
const TRI_VERTICES: [Vertex; 3] = [
  Vertex { pos: [ 0.0,  0.5, 0.], rgb: [1., 0., 0.] }, // top, red
  Vertex { pos: [-0.5, -0.5, 0.], rgb: [0., 1., 0.] }, // bottom left, green
  Vertex { pos: [ 0.5, -0.5, 0.], rgb: [0., 0., 1.] }, // bottom right, blue
];

/// Advance the rotation by one frame.
pub fn advance(angle: Deg<f32>) -> Deg<f32> {
  let next = angle + ANGLE_STEP;

  if next >= FULL_TURN {
    Deg(0.)
  } else {
    next
  }
}

pub struct LocalExample {
  program: Program,
  triangle: VertexArray<Vertex>,
  angle_uniform: Uniform<f32>,
  angle: Deg<f32>,
}

impl Example for LocalExample {
  const TITLE: &'static str = "Rotating Triangle";
  const WINDOW_SIZE: [u32; 2] = [640, 480];

  fn bootstrap(gl: &mut GL33) -> Result<Self, ExampleError> {
    let program = gl.new_program_from_strings(VS, FS)?;
    let triangle = gl.new_vertex_array(&TRI_VERTICES, Mode::Triangle)?;
    let angle_uniform = program.ask_uniform_or_unbound("angle");

    gl.set_polygon_mode(PolygonMode::Fill);
    log::debug!("rotating by {:?} per frame", ANGLE_STEP);

    Ok(Self {
      program,
      triangle,
      angle_uniform,
      angle: Deg(0.),
    })
  }

  fn render_frame(
    mut self,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut GL33,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if action == InputAction::Quit {
        return LoopFeedback::Exit;
      }

      handle_resize(gl, &action);
    }

    gl.clear();

    self.angle = advance(self.angle);
    self.program.set(&self.angle_uniform, self.angle.0);
    gl.render(&self.program, &self.triangle);

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn angle_increases_by_one_step() {
    assert_eq!(advance(Deg(0.)), Deg(1.));
    assert_eq!(advance(Deg(41.)), Deg(42.));
  }

  #[test]
  fn angle_strictly_increases_until_wrap() {
    let mut angle = Deg(0.);

    for _ in 0..359 {
      let next = advance(angle);
      assert!(next > angle);
      assert_eq!(next, angle + ANGLE_STEP);
      angle = next;
    }

    assert_eq!(angle, Deg(359.));
  }

  #[test]
  fn angle_resets_at_full_turn() {
    assert_eq!(advance(Deg(359.)), Deg(0.));
  }

  #[test]
  fn angle_resets_past_full_turn() {
    assert_eq!(advance(Deg(359.5)), Deg(0.));
    assert_eq!(advance(Deg(400.)), Deg(0.));
  }

  #[test]
  fn full_cycle_is_360_frames() {
    let mut angle = Deg(0.);

    for _ in 0..360 {
      angle = advance(angle);
    }

    assert_eq!(angle, Deg(0.));
  }

  #[test]
  fn interleaved_layout_matches_type() {
    assert_eq!(std::mem::size_of::<Vertex>(), 6 * std::mem::size_of::<f32>());
    assert_eq!(Vertex::ATTRIBS[0].index, 0);
    assert_eq!(Vertex::ATTRIBS[1].index, 1);
  }
}
