//! 팝업 다이얼로그
//!
//! 내보내기 폼 위에 겹쳐 뜨는 알림, 덮어쓰기 확인, 플레이스홀더 목록

mod kind;
mod render;

pub use kind::{DialogKind, DialogResult};
pub use render::Dialog;
