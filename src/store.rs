use log::debug;

use crate::{
    geometry::MIN_REGION_SIZE, BBox, Detection, ImageBounds, RegionId, TextRegion,
};

/// Size given to regions created via [`RegionStore::add_region`], before
/// clamping into the image.
const DEFAULT_REGION_SIZE: (f32, f32) = (100.0, 30.0);

/// Slice of store state an observer can register interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Regions,
    Selection,
}

/// Notification published to observers after a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    RegionAdded(RegionId),
    RegionUpdated(RegionId),
    RegionDeleted(RegionId),
    RegionsReplaced,
    RegionsCleared,
    SelectionChanged(Option<RegionId>),
}

impl StoreEvent {
    pub fn topic(&self) -> Topic {
        match self {
            StoreEvent::RegionAdded(_)
            | StoreEvent::RegionUpdated(_)
            | StoreEvent::RegionDeleted(_)
            | StoreEvent::RegionsReplaced
            | StoreEvent::RegionsCleared => Topic::Regions,
            StoreEvent::SelectionChanged(_) => Topic::Selection,
        }
    }
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Authoritative owner of the region collection and the current selection.
///
/// Mutations are synchronous and atomic with respect to the next event
/// (single event-processing thread); each one publishes a [`StoreEvent`] to
/// the observers subscribed to its topic, and only to those.
#[derive(Default)]
pub struct RegionStore {
    regions: Vec<TextRegion>,
    selected: Option<RegionId>,
    next_id: u32,
    observers: Vec<(Topic, Observer)>,
}

impl RegionStore {
    pub fn subscribe(&mut self, topic: Topic, observer: impl FnMut(&StoreEvent) + 'static) {
        self.observers.push((topic, Box::new(observer)));
    }

    fn publish(&mut self, event: StoreEvent) {
        let topic = event.topic();
        for (_, observer) in self.observers.iter_mut().filter(|(t, _)| *t == topic) {
            observer(&event);
        }
    }

    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    pub fn get(&self, id: RegionId) -> Option<&TextRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn selected_region(&self) -> Option<RegionId> {
        self.selected
    }

    /// Overwrite a region's bbox. An unknown id is a silent no-op: the drag
    /// gesture holding the id may outlive a deletion triggered elsewhere.
    pub fn update_region(&mut self, id: RegionId, bbox: BBox) {
        match self.regions.iter_mut().find(|r| r.id == id) {
            Some(region) => {
                region.bbox = bbox;
                self.publish(StoreEvent::RegionUpdated(id));
            }
            None => debug!("update for unknown {id}, dropped"),
        }
    }

    pub fn select_region(&mut self, id: RegionId) {
        if self.get(id).is_some() && self.selected != Some(id) {
            self.selected = Some(id);
            self.publish(StoreEvent::SelectionChanged(Some(id)));
        }
    }

    pub fn deselect(&mut self) {
        if self.selected.take().is_some() {
            self.publish(StoreEvent::SelectionChanged(None));
        }
    }

    pub fn delete_region(&mut self, id: RegionId) {
        let before = self.regions.len();
        self.regions.retain(|r| r.id != id);
        if self.regions.len() == before {
            return;
        }
        self.publish(StoreEvent::RegionDeleted(id));
        if self.selected == Some(id) {
            self.selected = None;
            self.publish(StoreEvent::SelectionChanged(None));
        }
    }

    /// Add a default-sized region centered in the image and select it.
    pub fn add_region(&mut self, bounds: ImageBounds) -> RegionId {
        let width = DEFAULT_REGION_SIZE.0.min(bounds.width).max(MIN_REGION_SIZE);
        let height = DEFAULT_REGION_SIZE.1.min(bounds.height).max(MIN_REGION_SIZE);
        let bbox = BBox::new(
            ((bounds.width - width) * 0.5).max(0.0),
            ((bounds.height - height) * 0.5).max(0.0),
            width,
            height,
        );

        let id = self.alloc_id();
        self.regions.push(TextRegion {
            id,
            bbox,
            text: String::new(),
            confidence: 1.0,
        });
        self.publish(StoreEvent::RegionAdded(id));
        self.selected = Some(id);
        self.publish(StoreEvent::SelectionChanged(Some(id)));
        id
    }

    pub fn clear(&mut self) {
        if self.regions.is_empty() {
            return;
        }
        self.regions.clear();
        self.publish(StoreEvent::RegionsCleared);
        if self.selected.take().is_some() {
            self.publish(StoreEvent::SelectionChanged(None));
        }
    }

    /// Install detection results as the new region set, assigning fresh ids.
    pub fn replace_all(&mut self, detections: Vec<Detection>) {
        let regions = detections
            .into_iter()
            .map(|d| TextRegion {
                id: self.alloc_id(),
                bbox: d.bbox,
                text: d.text,
                confidence: d.confidence,
            })
            .collect();
        self.regions = regions;
        self.publish(StoreEvent::RegionsReplaced);
        if self.selected.take().is_some() {
            self.publish(StoreEvent::SelectionChanged(None));
        }
    }

    fn alloc_id(&mut self) -> RegionId {
        let id = RegionId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn bounds() -> ImageBounds {
        ImageBounds::new(400.0, 300.0)
    }

    fn store_with_detections(n: usize) -> RegionStore {
        let mut store = RegionStore::default();
        store.replace_all(
            (0..n)
                .map(|i| Detection {
                    bbox: BBox::new(10.0 * i as f32, 20.0, 50.0, 20.0),
                    text: format!("word{i}"),
                    confidence: 0.9,
                })
                .collect(),
        );
        store
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut store = store_with_detections(1);
        let stale = RegionId::new(99);
        store.update_region(stale, BBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(store.len(), 1);
        assert!(store.get(stale).is_none());
    }

    #[test]
    fn update_overwrites_bbox() {
        let mut store = store_with_detections(1);
        let id = store.regions()[0].id;
        let bbox = BBox::new(5.0, 5.0, 30.0, 15.0);
        store.update_region(id, bbox);
        assert_eq!(store.get(id).unwrap().bbox, bbox);
    }

    #[test]
    fn delete_clears_matching_selection() {
        let mut store = store_with_detections(2);
        let id = store.regions()[0].id;
        store.select_region(id);
        store.delete_region(id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_region(), None);
    }

    #[test]
    fn delete_keeps_unrelated_selection() {
        let mut store = store_with_detections(2);
        let keep = store.regions()[0].id;
        let gone = store.regions()[1].id;
        store.select_region(keep);
        store.delete_region(gone);
        assert_eq!(store.selected_region(), Some(keep));
    }

    #[test]
    fn add_region_is_centered_clamped_and_selected() {
        let mut store = RegionStore::default();
        let id = store.add_region(ImageBounds::new(60.0, 12.0));
        let bbox = store.get(id).unwrap().bbox;
        assert_eq!(bbox.width, 60.0);
        assert_eq!(bbox.height, 12.0);
        assert_eq!((bbox.x, bbox.y), (0.0, 0.0));
        assert_eq!(store.selected_region(), Some(id));

        let id2 = store.add_region(bounds());
        let bbox2 = store.get(id2).unwrap().bbox;
        assert_eq!((bbox2.x, bbox2.y), (150.0, 135.0));
    }

    #[test]
    fn ids_stay_unique_across_replace() {
        let mut store = store_with_detections(2);
        let first_ids: Vec<_> = store.regions().iter().map(|r| r.id).collect();
        store.replace_all(vec![Detection {
            bbox: BBox::new(0.0, 0.0, 20.0, 20.0),
            text: String::new(),
            confidence: 1.0,
        }]);
        assert!(!first_ids.contains(&store.regions()[0].id));
    }

    #[test]
    fn observers_only_see_their_topic() {
        let mut store = RegionStore::default();
        let region_events = Rc::new(RefCell::new(Vec::new()));
        let selection_events = Rc::new(RefCell::new(Vec::new()));

        let sink = region_events.clone();
        store.subscribe(Topic::Regions, move |e| sink.borrow_mut().push(e.clone()));
        let sink = selection_events.clone();
        store.subscribe(Topic::Selection, move |e| sink.borrow_mut().push(e.clone()));

        let id = store.add_region(bounds());
        store.deselect();

        assert_eq!(*region_events.borrow(), vec![StoreEvent::RegionAdded(id)]);
        assert_eq!(
            *selection_events.borrow(),
            vec![
                StoreEvent::SelectionChanged(Some(id)),
                StoreEvent::SelectionChanged(None)
            ]
        );
    }
}
