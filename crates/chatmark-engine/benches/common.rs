// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_message(turns: usize) -> String {
    let base = "上月销售额同比增长 12%。\n[kpi:{\"label\":\"销售额\",\"value\":1234}]\n请选择区域 [choices:华东|华南|华北]\n[steps:取数 -> 清洗 -> 建模]\n你想看哪个？[门店A|门店B]\n";
    base.repeat(turns)
}

/// Char-boundary prefixes of `text`, as a streaming client would see them
/// when chunks arrive `step` characters at a time.
#[allow(dead_code)]
pub fn stream_prefixes(text: &str, step: usize) -> Vec<&str> {
    let mut prefixes: Vec<&str> = text
        .char_indices()
        .step_by(step.max(1))
        .skip(1)
        .map(|(end, _)| &text[..end])
        .collect();
    prefixes.push(text);
    prefixes
}
