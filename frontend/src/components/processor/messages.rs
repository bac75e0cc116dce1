#[derive(Clone)]
pub enum Msg {
    OpenFileDialog,
    FileSelected(web_sys::File),
    Completed(String),
    Failed(String),
    Reset,
}
