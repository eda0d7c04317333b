//! 책별 코퍼스 파일에서 장/절 범위의 본문을 찾아 주는 모듈 모음.

pub mod corpus;
pub mod reference_store;
pub mod verse_spec;

pub use corpus::*;
pub use reference_store::*;
pub use verse_spec::*;
