use std::process::ExitCode;

use new_testament_viewer::cli;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    cli::run_from_env()
}
