// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use vectoroids_app::ipc;
use vectoroids_app::state::AppState;

fn main() {
    env_logger::init();

    tauri::Builder::default()
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            ipc::start_game_loop,
            ipc::send_command,
            ipc::get_snapshot,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Vectoroids");
}
