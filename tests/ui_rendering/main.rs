mod common;
mod repl_key_flow_test;
mod timeline_input_render_test;
mod timeline_scroll_mouse_test;
mod speech_flow_test;
