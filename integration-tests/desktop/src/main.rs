use colored::Colorize as _;

macro_rules! tests {
  ($($name:expr, $module:ident),*) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) {
      $(
        if name == $name {
          $module::fixture();
          return;
        }
      )*

      println!("{} is not a valid test. Possible values", name.red());

      for test_name in TEST_NAMES {
        println!("  -> {}", test_name.blue());
      }
    }
  }
}

// every fixture acquires the graphics state, so run one fixture per process
tests! {
  "invalid-shader-log", invalid_shader_log,
  "window-close-exit", window_close_exit
}

fn main() {
  let test_name = std::env::args().nth(1);

  if let Some(test_name) = test_name {
    println!("test name: {}", test_name.green());

    run_test(&test_name);
  } else {
    println!("Please provide a test name. Possible values");

    for test_name in TEST_NAMES {
      println!("  -> {}", test_name.blue());
    }
  }
}
