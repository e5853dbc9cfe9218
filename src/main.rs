fn main() -> eframe::Result {
    text_eraser::run_native(
        Box::new(text_eraser::FixedDetector::demo()),
        Box::new(text_eraser::FillInpainter),
    )
}
