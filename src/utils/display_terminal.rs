//! 터미널 출력 포맷팅 유틸리티
//!
//! 기동 시 컴포넌트 초기화 과정을 박스/트리 형태로 출력합니다.

/// 50칸 너비의 박스 제목을 출력합니다.
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 초기화 완료 요약을 출력합니다.
pub fn print_final_summary(components: usize) {
    println!();
    print_boxed_title("🎉 COMPONENTS INITIALIZED");
    println!("   📦 Components: {}", components);
    println!();
}
