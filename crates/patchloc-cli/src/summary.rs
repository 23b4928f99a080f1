use console::Style;
use patchloc_core::bench::BenchConfig;
use patchloc_core::matching::CorrelationBackend;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_bench_summary(config: &BenchConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Patchloc Benchmark"));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}")
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Corpus"),
        s.path.apply_to(config.corpus_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Sweep"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Levels"),
        s.value.apply_to(format!("{:?}", config.distortion_levels))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scales"),
        s.value.apply_to(format!("{:?}", config.scale_factors))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Trials"),
        s.value.apply_to(format!("{} per batch", config.trials_per_batch))
    );
    println!();

    println!("  {}", s.header.apply_to("Matching"));
    let backend = match config.matching.backend {
        CorrelationBackend::Fft => "fft",
        CorrelationBackend::Direct => "direct",
    };
    println!(
        "    {:<12}{}",
        s.label.apply_to("Backend"),
        s.method.apply_to(backend)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Peaks"),
        s.value.apply_to(config.matching.peak_count)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(format!("{} px", config.matching.distance_threshold))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Border"),
        if config.matching.exclude_border_peaks {
            s.method.apply_to("excluded")
        } else {
            s.disabled.apply_to("included")
        }
    );
    if config.save_diagnostics {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Diagnostics"),
            s.method.apply_to("enabled")
        );
    }
    println!();
}
