//! This program shows how to move a triangle around and change its color from the keyboard.
//!
//! The color and the position of the triangle live on the CPU side and are sent to the shader as
//! uniforms every frame.
//!
//! Press the <up>, <down>, <left> and <right> arrows to move the triangle by a fixed step per
//! press. Press <R>, <G> or <B> to paint it red, green or blue.
//! Press <escape> to quit or close the window.

use crate::{handle_resize, ColorPreset, Example, ExampleError, InputAction, LoopFeedback};
use cgmath::{Vector2, Vector3};
use devgl_gl::{
  gl33::{
    Mode, Program, Uniform, Vertex as GLVertex, VertexArray, VertexAttribDesc, VertexAttribDim,
  },
  GL33,
};

const VS: &str = include_str!("triangle-vs.glsl");
const FS: &str = include_str!("triangle-fs.glsl");

/// Distance the triangle moves per key press.
pub const STEP: f32 = 0.1;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  pub pos: [f32; 2],
}

impl GLVertex for Vertex {
  const ATTRIBS: &'static [VertexAttribDesc] = &[VertexAttribDesc::new(0, VertexAttribDim::Dim2)];
}

const TRI_VERTICES: [Vertex; 3] = [
  // bottom left
  Vertex { pos: [-0.5, -0.5] },
  // bottom right
  Vertex { pos: [0.5, -0.5] },
  // top
  Vertex { pos: [0.0, 0.5] },
];

/// Interaction state of the triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleState {
  /// Current color.
  pub color: Vector3<f32>,
  /// Translation applied to every vertex.
  pub position: Vector2<f32>,
}

impl Default for TriangleState {
  fn default() -> Self {
    TriangleState {
      color: ColorPreset::Red.rgb(),
      position: Vector2::new(0., 0.),
    }
  }
}

impl TriangleState {
  /// Apply a single input action.
  ///
  /// Returns [`LoopFeedback::Exit`] when the action asks to quit.
  pub fn apply(mut self, action: InputAction) -> LoopFeedback<Self> {
    match action {
      InputAction::Quit => return LoopFeedback::Exit,
      InputAction::Up => self.position.y += STEP,
      InputAction::Down => self.position.y -= STEP,
      InputAction::Left => self.position.x -= STEP,
      InputAction::Right => self.position.x += STEP,
      InputAction::SelectColor(preset) => self.color = preset.rgb(),
      InputAction::Resized { .. } => (),
    }

    LoopFeedback::Continue(self)
  }
}

pub struct LocalExample {
  program: Program,
  triangle: VertexArray<Vertex>,
  color: Uniform<[f32; 3]>,
  offset: Uniform<[f32; 2]>,
  state: TriangleState,
}

impl Example for LocalExample {
  const TITLE: &'static str = "Keyboard Interaction, Press R, G, B Use Left, Right, Up, Down arrow";
  const WINDOW_SIZE: [u32; 2] = [800, 600];

  fn bootstrap(gl: &mut GL33) -> Result<Self, ExampleError> {
    let program = gl.new_program_from_strings(VS, FS)?;
    let triangle = gl.new_vertex_array(&TRI_VERTICES, Mode::Triangle)?;
    let color = program.ask_uniform_or_unbound("color");
    let offset = program.ask_uniform_or_unbound("offset");

    Ok(Self {
      program,
      triangle,
      color,
      offset,
      state: TriangleState::default(),
    })
  }

  fn render_frame(
    mut self,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut GL33,
  ) -> LoopFeedback<Self> {
    for action in actions {
      handle_resize(gl, &action);

      match self.state.apply(action) {
        LoopFeedback::Continue(state) => {
          if state != self.state {
            log::debug!("triangle: color {:?}, position {:?}", state.color, state.position);
          }

          self.state = state;
        }
        LoopFeedback::Exit => return LoopFeedback::Exit,
      }
    }

    gl.clear();

    // the uniforms are set for this draw only; nothing leaks into the next frame
    self.program.set(&self.color, self.state.color.into());
    self.program.set(&self.offset, self.state.position.into());
    gl.render(&self.program, &self.triangle);

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn step(state: TriangleState, action: InputAction) -> TriangleState {
    match state.apply(action) {
      LoopFeedback::Continue(state) => state,
      LoopFeedback::Exit => panic!("unexpected exit on {:?}", action),
    }
  }

  #[test]
  fn starts_red_and_centered() {
    let state = TriangleState::default();

    assert_eq!(state.color, Vector3::new(1., 0., 0.));
    assert_eq!(state.position, Vector2::new(0., 0.));
  }

  #[test]
  fn up_moves_by_exactly_one_step() {
    let state = step(TriangleState::default(), InputAction::Up);

    assert_eq!(state.position.y, STEP);
    assert_eq!(state.position.x, 0.);
  }

  #[test]
  fn arrows_move_along_their_axis() {
    let down = step(TriangleState::default(), InputAction::Down);
    assert_eq!(down.position, Vector2::new(0., -STEP));

    let left = step(TriangleState::default(), InputAction::Left);
    assert_eq!(left.position, Vector2::new(-STEP, 0.));

    let right = step(TriangleState::default(), InputAction::Right);
    assert_eq!(right.position, Vector2::new(STEP, 0.));
  }

  #[test]
  fn each_press_is_one_step() {
    let state = [InputAction::Up, InputAction::Up, InputAction::Right]
      .iter()
      .fold(TriangleState::default(), |state, action| step(state, *action));

    assert_eq!(state.position.x, STEP);
    assert_eq!(state.position.y, STEP + STEP);
  }

  #[test]
  fn opposite_presses_cancel_out() {
    let state = step(step(TriangleState::default(), InputAction::Left), InputAction::Right);
    assert_eq!(state.position, Vector2::new(0., 0.));
  }

  #[test]
  fn color_keys_set_exact_colors() {
    let state = TriangleState::default();

    let green = step(state, InputAction::SelectColor(ColorPreset::Green));
    assert_eq!(green.color, Vector3::new(0., 1., 0.));

    let blue = step(green, InputAction::SelectColor(ColorPreset::Blue));
    assert_eq!(blue.color, Vector3::new(0., 0., 1.));

    let red = step(blue, InputAction::SelectColor(ColorPreset::Red));
    assert_eq!(red.color, Vector3::new(1., 0., 0.));
  }

  #[test]
  fn color_change_keeps_position() {
    let moved = step(TriangleState::default(), InputAction::Up);
    let painted = step(moved, InputAction::SelectColor(ColorPreset::Blue));

    assert_eq!(painted.position, moved.position);
  }

  #[test]
  fn quit_requests_close() {
    assert_eq!(
      TriangleState::default().apply(InputAction::Quit),
      LoopFeedback::Exit
    );
  }

  #[test]
  fn resize_leaves_state_untouched() {
    let state = step(TriangleState::default(), InputAction::Left);
    let resized = step(
      state,
      InputAction::Resized {
        width: 10,
        height: 10,
      },
    );

    assert_eq!(resized, state);
  }

  #[test]
  fn vertex_layout_matches_type() {
    assert_eq!(Vertex::ATTRIBS.len(), 1);
    assert_eq!(std::mem::size_of::<Vertex>(), 2 * std::mem::size_of::<f32>());
  }
}
