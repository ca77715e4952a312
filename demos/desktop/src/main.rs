use devgl_demos_desktop::{init_logging, run_and_exit};
use std::process;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available examples.
  list_examples: bool,

  /// Example to run.
  example: Option<String>,
}

/// Macro to declaratively add examples.
macro_rules! examples {
  ($($ex_name:literal, $test_ident:ident),* $(,)?) => {
    fn show_available_examples() {
      println!("available examples:");
      $( println!("  - {}", $ex_name); )*
    }

    // run an example based on its name
    fn pick_and_run_example(cli_opts: CLIOpts) {
      let example_name = cli_opts.example.as_deref();
      match example_name {
        $(
          Some($ex_name) => run_and_exit::<devgl_demos::$test_ident::LocalExample>(),
        )*

        Some(name) => {
          log::error!("no example named {}", name);
          show_available_examples();
          process::exit(1);
        }

        None => {
          log::error!("no example provided");
          show_available_examples();
          process::exit(1);
        }
      }
    }
  }
}

examples! {
  "window", window,
  "keyboard-triangle", keyboard_triangle,
  "rotating-triangle", rotating_triangle,
}

fn main() {
  init_logging();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_examples {
    show_available_examples();
  } else {
    pick_and_run_example(cli_opts);
  }
}
