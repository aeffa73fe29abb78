//! UseCase 層
//!
//! チャットセッション（接続・送信・受信ループ・切断）を実装するレイヤー。
//! Domain 層の trait（Connector）にのみ依存します。

pub mod chat_session;
pub mod error;
pub mod event;

pub use chat_session::ChatSession;
pub use error::ChatError;
pub use event::SessionEvent;
