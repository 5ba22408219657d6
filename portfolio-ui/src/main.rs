mod app;
mod bridge;
mod dom;
mod sections;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("portfolio starting");

    app::start();
}
