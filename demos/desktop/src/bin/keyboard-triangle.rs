fn main() {
  devgl_demos_desktop::init_logging();
  devgl_demos_desktop::run_and_exit::<devgl_demos::keyboard_triangle::LocalExample>();
}
