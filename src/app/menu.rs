use crate::{AsyncTask, ImageState};

impl super::RegionEditorApp {
    pub(super) fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let image_loaded = matches!(self.image_state, ImageState::Loaded(_));

            if self.detect_job.is_some() {
                ui.spinner();
                ui.label("Detecting…");
            } else if self.detection_mode {
                if ui.button("Exit text detection").clicked() {
                    self.detection_mode = false;
                    self.store.deselect();
                }
            } else {
                ui.scope(|ui| {
                    if !image_loaded {
                        ui.disable();
                    }
                    if ui.button("Detect text").clicked() {
                        if let Some(loaded) = self.image_state.loaded() {
                            self.detect_job =
                                Some(AsyncTask::new(self.detector.detect(&loaded.image)));
                        }
                    }
                });
            }

            if !self.detection_mode {
                if let Some(status) = &self.status {
                    ui.label(status);
                }
                return;
            }

            ui.label(format!("{} text regions", self.store.len()));

            if ui.button("Add region").clicked() {
                if let Some(bounds) = self.image_state.loaded().map(|l| l.bounds) {
                    self.store.add_region(bounds);
                }
            }

            ui.scope(|ui| {
                if self.store.selected_region().is_none() {
                    ui.disable();
                }
                if ui.button("Delete").clicked() {
                    if let Some(id) = self.store.selected_region() {
                        self.store.delete_region(id);
                        if self.gesture.active_region() == Some(id) {
                            self.gesture.end();
                        }
                    }
                }
            });

            ui.scope(|ui| {
                if self.store.is_empty() {
                    ui.disable();
                }
                if ui.button("Clear all").clicked() {
                    self.store.clear();
                }
            });

            if self.inpaint_job.is_some() {
                ui.spinner();
                ui.label("Removing…");
            } else {
                ui.scope(|ui| {
                    if self.store.is_empty() {
                        ui.disable();
                    }
                    if ui.button("Remove text").clicked() {
                        if let Some(loaded) = self.image_state.loaded() {
                            self.inpaint_job = Some(AsyncTask::new(
                                self.inpainter
                                    .remove_regions(&loaded.image, self.store.regions()),
                            ));
                        }
                    }
                });
            }

            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }
}
