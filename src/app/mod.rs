use std::io;

use egui::{self, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use futures::future::BoxFuture;
use image::DynamicImage;
use log::info;

use crate::{
    AsyncTask, BBox, Detection, DragGesture, DragHandle, ImageBounds, ImageState, Inpainter,
    RegionId, RegionStore, TextDetector, Topic, Viewport,
};

mod menu;
mod native;

pub use native::run_native;

pub(crate) type ImageLoader = Box<dyn Fn() -> BoxFuture<'static, io::Result<DynamicImage>>>;

/// Screen-space reach of the edge/corner affordances, independent of zoom.
const EDGE_BAND: f32 = 4.0;
const CORNER_RADIUS: f32 = 6.0;

const SELECTED_STROKE: Color32 = Color32::from_rgb(59, 130, 246);
const UNSELECTED_STROKE: Color32 = Color32::from_rgb(250, 204, 21);

pub(crate) struct RegionEditorApp {
    image_loader: ImageLoader,
    image_state: ImageState,
    store: RegionStore,
    gesture: DragGesture,
    detector: Box<dyn TextDetector>,
    inpainter: Box<dyn Inpainter>,
    detect_job: Option<AsyncTask<io::Result<Vec<Detection>>>>,
    inpaint_job: Option<AsyncTask<io::Result<DynamicImage>>>,
    detection_mode: bool,
    status: Option<String>,
}

impl RegionEditorApp {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        image_loader: ImageLoader,
        detector: Box<dyn TextDetector>,
        inpainter: Box<dyn Inpainter>,
    ) -> Self {
        let mut store = RegionStore::default();
        let repaint = cc.egui_ctx.clone();
        store.subscribe(Topic::Regions, move |_| repaint.request_repaint());
        let repaint = cc.egui_ctx.clone();
        store.subscribe(Topic::Selection, move |_| repaint.request_repaint());

        Self {
            image_loader,
            image_state: ImageState::NotLoaded,
            store,
            gesture: DragGesture::default(),
            detector,
            inpainter,
            detect_job: None,
            inpaint_job: None,
            detection_mode: false,
            status: None,
        }
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(task) = &mut self.detect_job {
            if let Some(result) = task.data() {
                self.detect_job = None;
                match result {
                    Ok(detections) => {
                        info!("Detected {} text regions", detections.len());
                        self.store.replace_all(detections);
                        self.detection_mode = true;
                        self.status = None;
                    }
                    Err(e) => self.status = Some(format!("Detection failed: {e}")),
                }
            }
        }
        if let Some(task) = &mut self.inpaint_job {
            if let Some(result) = task.data() {
                self.inpaint_job = None;
                match result {
                    Ok(edited) => match self
                        .image_state
                        .loaded()
                        .map(|loaded| loaded.replace(edited, ctx))
                    {
                        Some(Ok(())) => {
                            self.store.clear();
                            self.detection_mode = false;
                            self.status = None;
                        }
                        Some(Err(e)) => self.status = Some(e.to_string()),
                        None => {}
                    },
                    Err(e) => self.status = Some(format!("Inpainting failed: {e}")),
                }
            }
        }
        if self.detect_job.is_some() || self.inpaint_job.is_some() {
            ctx.request_repaint();
        }
    }

    fn hit_region(&self, pos: Pos2, viewport: &Viewport) -> Option<(RegionId, DragHandle, BBox)> {
        // The selected region's affordances win over overlapping neighbors;
        // among the rest, the most recently added region is on top.
        let selected = self
            .store
            .selected_region()
            .and_then(|id| self.store.get(id));
        for region in selected.into_iter().chain(self.store.regions().iter().rev()) {
            let rect = viewport.bbox_to_screen(region.bbox);
            if let Some(handle) = handle_at(rect, pos) {
                return Some((region.id, handle, region.bbox));
            }
        }
        None
    }

    fn handle_region_interaction(
        &mut self,
        response: &egui::Response,
        ctx: &egui::Context,
        viewport: &Viewport,
        bounds: ImageBounds,
    ) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((id, handle, bbox)) = self.hit_region(pos, viewport) {
                    self.gesture.begin(id, handle, pos, bbox);
                    self.store.select_region(id);
                }
            }
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((id, bbox)) = self.gesture.update(pos, viewport, bounds) {
                    self.store.update_region(id, bbox);
                }
            }
        }

        if response.drag_stopped() {
            self.gesture.end();
        }
        // A lost pointer-up (e.g. focus change) must not leave the gesture
        // stuck mutating a stale selection.
        if self.gesture.is_active() && !ctx.input(|i| i.pointer.any_down()) {
            self.gesture.end();
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match self.hit_region(pos, viewport) {
                    Some((id, _, _)) => self.store.select_region(id),
                    None => self.store.deselect(),
                }
            }
        }

        if let Some(id) = self.store.selected_region() {
            if ctx
                .input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
            {
                self.store.delete_region(id);
                if self.gesture.active_region() == Some(id) {
                    self.gesture.end();
                }
            }
        }

        match &self.gesture {
            DragGesture::Dragging { handle, .. } => ctx.set_cursor_icon(cursor_for(*handle, true)),
            DragGesture::Idle => {
                if let Some((_, handle, _)) = response
                    .hover_pos()
                    .and_then(|pos| self.hit_region(pos, viewport))
                {
                    ctx.set_cursor_icon(cursor_for(handle, false));
                }
            }
        }
    }

    fn paint_regions(&self, painter: &egui::Painter, viewport: &Viewport) {
        for region in self.store.regions() {
            let rect = viewport.bbox_to_screen(region.bbox);
            let selected = self.store.selected_region() == Some(region.id);
            let stroke_color = if selected {
                SELECTED_STROKE
            } else {
                UNSELECTED_STROKE
            };

            painter.rect_filled(rect, 0.0, stroke_color.gamma_multiply(0.1));
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, stroke_color), StrokeKind::Inside);

            if selected {
                for corner in [
                    rect.left_top(),
                    rect.right_top(),
                    rect.left_bottom(),
                    rect.right_bottom(),
                ] {
                    painter.circle_filled(corner, 4.0, SELECTED_STROKE);
                }
            }

            if !region.text.is_empty() {
                let label = if region.confidence < 1.0 {
                    format!("{} ({:.0}%)", region.text, region.confidence * 100.0)
                } else {
                    region.text.clone()
                };
                let galley =
                    painter.layout_no_wrap(label, FontId::proportional(12.0), Color32::WHITE);
                let text_pos = rect.left_top() - Vec2::new(0.0, galley.size().y + 6.0);
                painter.rect_filled(
                    Rect::from_min_size(text_pos, galley.size()).expand(2.0),
                    2.0,
                    Color32::from_black_alpha(200),
                );
                painter.galley(text_pos, galley, Color32::WHITE);
            }
        }
    }
}

impl eframe::App for RegionEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Text eraser");
            self.menu_ui(ui);
            self.image_state.update(ui.ctx(), &*self.image_loader);

            let viewport_rect = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(viewport_rect, Sense::click_and_drag());
            let painter = ui.painter().with_clip_rect(viewport_rect);

            let Some((texture, bounds)) = self
                .image_state
                .loaded()
                .map(|loaded| (loaded.texture(), loaded.bounds))
            else {
                if let ImageState::Error(e) = &self.image_state {
                    ui.label(format!("Error: {e}"));
                }
                return;
            };

            let viewport = Viewport::fit(bounds, viewport_rect);
            painter.image(
                texture.id,
                viewport.image_rect(bounds),
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );

            if self.detection_mode {
                self.handle_region_interaction(&response, ui.ctx(), &viewport, bounds);
                self.paint_regions(&painter, &viewport);
            }
        });
    }
}

/// Which affordance the pointer is over, given a region's screen rect.
/// Corners win over edges, edges over the body.
fn handle_at(rect: Rect, pos: Pos2) -> Option<DragHandle> {
    let corners = [
        (rect.left_top(), DragHandle::TopLeft),
        (rect.right_top(), DragHandle::TopRight),
        (rect.left_bottom(), DragHandle::BottomLeft),
        (rect.right_bottom(), DragHandle::BottomRight),
    ];
    for (corner, handle) in corners {
        if corner.distance(pos) <= CORNER_RADIUS {
            return Some(handle);
        }
    }

    if !rect.expand(EDGE_BAND).contains(pos) {
        return None;
    }
    if (pos.y - rect.top()).abs() <= EDGE_BAND {
        return Some(DragHandle::Top);
    }
    if (pos.y - rect.bottom()).abs() <= EDGE_BAND {
        return Some(DragHandle::Bottom);
    }
    if (pos.x - rect.left()).abs() <= EDGE_BAND {
        return Some(DragHandle::Left);
    }
    if (pos.x - rect.right()).abs() <= EDGE_BAND {
        return Some(DragHandle::Right);
    }
    rect.contains(pos).then_some(DragHandle::Move)
}

fn cursor_for(handle: DragHandle, dragging: bool) -> CursorIcon {
    match handle {
        DragHandle::Move => {
            if dragging {
                CursorIcon::Grabbing
            } else {
                CursorIcon::Grab
            }
        }
        DragHandle::Top | DragHandle::Bottom => CursorIcon::ResizeVertical,
        DragHandle::Left | DragHandle::Right => CursorIcon::ResizeHorizontal,
        DragHandle::TopLeft | DragHandle::BottomRight => CursorIcon::ResizeNwSe,
        DragHandle::TopRight | DragHandle::BottomLeft => CursorIcon::ResizeNeSw,
    }
}
