//! Accordion component for expandable content sections
//!
//! A set of vertically stacked sections, each a tappable header above a
//! [`Collapsible`] body. At most one section is open at a time: the
//! accordion stores only the active section index and derives every
//! section's open state from it.
//!
//! # Example
//!
//! ```ignore
//! use unfold_widgets::prelude::*;
//!
//! let scheduler = SchedulerHandle::new();
//! let mut faq = accordion(scheduler.clone(), vec![("What is Unfold?", "A widget kit"), ("Is it fast?", "Yes")])
//!     .header(|(q, _), _, active| text(if active { format!("- {q}") } else { format!("+ {q}") }))
//!     .content(|(_, a), _, _| text(*a))
//!     .initially_active_section(0)
//!     .build()?;
//!
//! faq.press(1)?;
//! ```

use crate::collapsible::Collapsible;
use crate::config::{AccordionConfig, Align};
use crate::error::Result;
use crate::props::partition_props;
use serde_json::{Map, Value};
use unfold_animation::{AnimationDriver, EasingSpec, SchedulerHandle};
use unfold_layout::{touchable, view, LayoutReport, View};

/// Renders a section's header or body from `(section, index, is_active)`
pub type SectionRenderer<S> = Box<dyn Fn(&S, usize, bool) -> View>;

/// Observer of active-section changes
pub type ChangeObserver = Box<dyn FnMut(Option<usize>)>;

/// Accordion component - header/content sections, at most one open
pub struct Accordion<S, D: AnimationDriver + Clone = SchedulerHandle> {
    driver: D,
    sections: Vec<S>,
    render_header: SectionRenderer<S>,
    render_content: SectionRenderer<S>,
    on_change: Option<ChangeObserver>,
    config: AccordionConfig,
    container_props: Map<String, Value>,
    active_section: Option<usize>,
    collapsibles: Vec<Collapsible<D>>,
}

impl<S, D: AnimationDriver + Clone> Accordion<S, D> {
    pub fn sections(&self) -> &[S] {
        &self.sections
    }

    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    /// Props forwarded to the outer container
    pub fn container_props(&self) -> &Map<String, Value> {
        &self.container_props
    }

    pub fn active_section(&self) -> Option<usize> {
        self.active_section
    }

    pub fn is_section_active(&self, index: usize) -> bool {
        self.active_section == Some(index)
    }

    pub fn collapsible(&self, index: usize) -> Option<&Collapsible<D>> {
        self.collapsibles.get(index)
    }

    /// Open `index`, or close it if it is already open
    ///
    /// The observer is told the new active section on every toggle,
    /// including `None` when the open section closes.
    pub fn toggle_section(&mut self, index: usize) -> Result<()> {
        let next = if self.active_section == Some(index) {
            None
        } else {
            Some(index)
        };
        tracing::debug!(index, previous = ?self.active_section, active = ?next, "toggle section");

        self.active_section = next;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(next);
        }
        self.sync_sections()
    }

    /// Tap on the header wrapper reporting `target`
    pub fn press(&mut self, target: usize) -> Result<()> {
        self.toggle_section(target)
    }

    /// Replace animation and container settings
    ///
    /// The active section is owned by the accordion after construction, so
    /// `initially_active_section` is only kept for reference.
    pub fn update_config(&mut self, config: AccordionConfig) -> Result<()> {
        // Rejected before any section sees it
        config.section_config(true).resolve_easing()?;

        let active = self.active_section;
        for (index, collapsible) in self.collapsibles.iter_mut().enumerate() {
            collapsible.update(config.section_config(active != Some(index)))?;
        }
        self.config = config;
        Ok(())
    }

    /// Replace the section data, adding or dropping collapsibles to match
    pub fn set_sections(&mut self, sections: Vec<S>) -> Result<()> {
        self.collapsibles.truncate(sections.len());
        while self.collapsibles.len() < sections.len() {
            let index = self.collapsibles.len();
            let collapsed = self.active_section != Some(index);
            self.collapsibles.push(Collapsible::new(
                self.driver.clone(),
                self.config.section_config(collapsed),
            )?);
        }
        self.sections = sections;
        Ok(())
    }

    /// Route layout events to the section collapsibles
    ///
    /// Returns how many measurements were applied.
    pub fn apply_layout(&mut self, report: &LayoutReport) -> usize {
        self.collapsibles
            .iter_mut()
            .map(|collapsible| collapsible.apply_layout(report))
            .filter(|applied| *applied)
            .count()
    }

    /// Render the accordion
    pub fn render(&self) -> View {
        let sections = self
            .sections
            .iter()
            .zip(&self.collapsibles)
            .enumerate()
            .map(|(index, (section, collapsible))| {
                let is_active = self.is_section_active(index);
                let header = touchable(index, self.config.underlay_color.as_str())
                    .child((self.render_header)(section, index, is_active));
                let body = collapsible.render((self.render_content)(section, index, is_active));
                view().child(header).child(body)
            });

        view()
            .passthrough(self.container_props.clone())
            .children(sections)
    }

    /// Push the derived collapsed flag into every section that changed
    fn sync_sections(&mut self) -> Result<()> {
        let active = self.active_section;
        for (index, collapsible) in self.collapsibles.iter_mut().enumerate() {
            let collapsed = active != Some(index);
            if collapsible.is_collapsed() != collapsed {
                collapsible.set_collapsed(collapsed)?;
            }
        }
        Ok(())
    }
}

/// Builder for creating Accordion components with fluent API
pub struct AccordionBuilder<S, D: AnimationDriver + Clone = SchedulerHandle> {
    driver: D,
    sections: Vec<S>,
    render_header: Option<SectionRenderer<S>>,
    render_content: Option<SectionRenderer<S>>,
    on_change: Option<ChangeObserver>,
    config: AccordionConfig,
    container_props: Map<String, Value>,
}

impl<S: 'static, D: AnimationDriver + Clone> AccordionBuilder<S, D> {
    pub fn new(driver: D, sections: Vec<S>) -> Self {
        Self {
            driver,
            sections,
            render_header: None,
            render_content: None,
            on_change: None,
            config: AccordionConfig::default(),
            container_props: Map::new(),
        }
    }

    /// Header renderer, wrapped in a touchable that toggles the section
    pub fn header<F>(mut self, render: F) -> Self
    where
        F: Fn(&S, usize, bool) -> View + 'static,
    {
        self.render_header = Some(Box::new(render));
        self
    }

    /// Body renderer, wrapped in the section's collapsible
    pub fn content<F>(mut self, render: F) -> Self
    where
        F: Fn(&S, usize, bool) -> View + 'static,
    {
        self.render_content = Some(Box::new(render));
        self
    }

    /// Observe active-section changes
    pub fn on_change<F>(mut self, observer: F) -> Self
    where
        F: FnMut(Option<usize>) + 'static,
    {
        self.on_change = Some(Box::new(observer));
        self
    }

    pub fn config(mut self, config: AccordionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.config.align = align;
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.config.duration = duration_ms;
        self
    }

    pub fn easing(mut self, easing: impl Into<EasingSpec>) -> Self {
        self.config.easing = easing.into();
        self
    }

    pub fn initially_active_section(mut self, index: usize) -> Self {
        self.config.initially_active_section = Some(index);
        self
    }

    pub fn underlay_color(mut self, color: impl Into<String>) -> Self {
        self.config.underlay_color = color.into();
        self
    }

    /// Apply a loose prop bag
    ///
    /// Animation and accordion keys are merged over the current config,
    /// view keys are forwarded to the container. `collapsed` is ignored
    /// since it is derived per section; unknown keys are dropped.
    pub fn props(mut self, props: Map<String, Value>) -> Result<Self> {
        let mut parts = partition_props(props);
        if parts.collapsible.remove("collapsed").is_some() {
            tracing::trace!("ignoring `collapsed` prop on accordion");
        }

        let mut overrides = parts.collapsible;
        overrides.append(&mut parts.accordion);
        self.config = merge_config(&self.config, overrides)?;
        self.container_props.append(&mut parts.container);
        Ok(self)
    }

    /// Build the final Accordion component
    ///
    /// Fails if the configured easing does not resolve.
    pub fn build(self) -> Result<Accordion<S, D>> {
        let active_section = self.config.initially_active_section;

        let collapsibles = (0..self.sections.len())
            .map(|index| {
                let collapsed = active_section != Some(index);
                Collapsible::new(self.driver.clone(), self.config.section_config(collapsed))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Accordion {
            driver: self.driver,
            sections: self.sections,
            render_header: self
                .render_header
                .unwrap_or_else(|| Box::new(empty_section::<S>)),
            render_content: self
                .render_content
                .unwrap_or_else(|| Box::new(empty_section::<S>)),
            on_change: self.on_change,
            config: self.config,
            container_props: self.container_props,
            active_section,
            collapsibles,
        })
    }
}

/// Overlay prop values on an existing config
fn merge_config(base: &AccordionConfig, overrides: Map<String, Value>) -> Result<AccordionConfig> {
    if overrides.is_empty() {
        return Ok(base.clone());
    }

    let mut merged = Map::new();
    merged.insert("align".into(), serde_json::to_value(base.align)?);
    merged.insert("duration".into(), Value::from(base.duration));
    merged.insert(
        "initiallyActiveSection".into(),
        serde_json::to_value(base.initially_active_section)?,
    );
    merged.insert("underlayColor".into(), Value::from(base.underlay_color.clone()));
    merged.extend(overrides.clone());

    let mut config: AccordionConfig = serde_json::from_value(Value::Object(merged))?;
    // Custom easing functions don't survive a round trip through JSON
    if !overrides.contains_key("easing") {
        config.easing = base.easing.clone();
    }
    Ok(config)
}

fn empty_section<S>(_: &S, _: usize, _: bool) -> View {
    view()
}

/// Create an accordion over `sections`
pub fn accordion<S: 'static, D: AnimationDriver + Clone>(
    driver: D,
    sections: Vec<S>,
) -> AccordionBuilder<S, D> {
    AccordionBuilder::new(driver, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use unfold_layout::text;

    fn faq(scheduler: &SchedulerHandle) -> AccordionBuilder<&'static str> {
        accordion(scheduler.clone(), vec!["alpha", "beta", "gamma"])
            .header(|title, _, active| text(format!("{title}{}", if active { " (open)" } else { "" })))
            .content(|title, _, _| text(format!("{title} body")))
    }

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_defaults_to_no_active_section() {
        let acc = faq(&SchedulerHandle::new()).build().unwrap();
        assert_eq!(acc.active_section(), None);
        assert_eq!(acc.config().underlay_color, "black");
        assert!((0..3).all(|k| acc.collapsible(k).unwrap().is_collapsed()));
    }

    #[test]
    fn test_initially_active_section() {
        let acc = faq(&SchedulerHandle::new())
            .initially_active_section(1)
            .build()
            .unwrap();
        assert_eq!(acc.active_section(), Some(1));
        assert!(!acc.collapsible(1).unwrap().is_collapsed());
        assert!(acc.collapsible(0).unwrap().is_collapsed());
    }

    #[test]
    fn test_toggle_open_switch_and_close() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = changes.clone();
        let mut acc = faq(&SchedulerHandle::new())
            .initially_active_section(2)
            .on_change(move |active| log.borrow_mut().push(active))
            .build()
            .unwrap();

        acc.toggle_section(1).unwrap();
        assert_eq!(acc.active_section(), Some(1));

        acc.toggle_section(1).unwrap();
        assert_eq!(acc.active_section(), None);

        acc.toggle_section(0).unwrap();
        assert_eq!(*changes.borrow(), vec![Some(1), None, Some(0)]);
    }

    #[test]
    fn test_collapsibles_follow_active_section() {
        let scheduler = SchedulerHandle::new();
        let mut acc = faq(&scheduler).build().unwrap();

        acc.toggle_section(0).unwrap();
        assert!(!acc.collapsible(0).unwrap().is_collapsed());
        assert!(acc.collapsible(0).unwrap().is_animating());
        assert!(!acc.collapsible(1).unwrap().is_animating());

        acc.toggle_section(2).unwrap();
        assert!(acc.collapsible(0).unwrap().is_collapsed());
        assert!(!acc.collapsible(2).unwrap().is_collapsed());
        assert_eq!(scheduler.animation_count(), 2);
    }

    #[test]
    fn test_render_marks_active_header() {
        let mut acc = faq(&SchedulerHandle::new()).build().unwrap();
        acc.press(1).unwrap();

        let tree = acc.render();
        let texts = tree.text_content();
        assert!(texts.contains(&"beta (open)"));
        assert!(texts.contains(&"alpha"));
        assert_eq!(tree.children.len(), 3);
    }

    #[test]
    fn test_props_partitioned_into_config_and_container() {
        let acc = faq(&SchedulerHandle::new())
            .props(props(json!({
                "align": "bottom",
                "duration": 120,
                "easing": "easeInQuad",
                "collapsed": false,
                "underlayColor": "gray",
                "initiallyActiveSection": 0,
                "testID": "faq",
                "somethingElse": 1,
            })))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(acc.config().align, Align::Bottom);
        assert_eq!(acc.config().duration, 120);
        assert_eq!(acc.config().easing, EasingSpec::named("easeInQuad"));
        assert_eq!(acc.config().underlay_color, "gray");
        assert_eq!(acc.active_section(), Some(0));
        assert_eq!(acc.container_props().get("testID"), Some(&json!("faq")));
        assert!(!acc.container_props().contains_key("somethingElse"));
        // `collapsed` is derived, never taken from props
        assert!(acc.collapsible(1).unwrap().is_collapsed());
        assert_eq!(acc.render().style.passthrough.get("testID"), Some(&json!("faq")));
    }

    #[test]
    fn test_props_keep_custom_easing() {
        let acc = faq(&SchedulerHandle::new())
            .easing(EasingSpec::custom(|t| t))
            .props(props(json!({ "duration": 10 })))
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(acc.config().easing, EasingSpec::Custom(_)));
        assert_eq!(acc.config().duration, 10);
    }

    #[test]
    fn test_bad_prop_type_is_error() {
        let result = faq(&SchedulerHandle::new()).props(props(json!({ "duration": "slow" })));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_easing_fails_build() {
        let result = faq(&SchedulerHandle::new()).easing("bogusName").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_config_reaches_every_section_without_animating() {
        let scheduler = SchedulerHandle::new();
        let mut acc = faq(&scheduler).initially_active_section(1).build().unwrap();

        let next = AccordionConfig {
            align: Align::Center,
            duration: 120,
            ..acc.config().clone()
        };
        acc.update_config(next).unwrap();

        assert_eq!(acc.config().duration, 120);
        for k in 0..3 {
            let section = acc.collapsible(k).unwrap().config();
            assert_eq!(section.duration, 120);
            assert_eq!(section.align, Align::Center);
        }
        assert!(!acc.collapsible(1).unwrap().is_collapsed());
        assert!(acc.collapsible(0).unwrap().is_collapsed());
        assert!(acc.collapsible(2).unwrap().is_collapsed());
        assert_eq!(acc.active_section(), Some(1));
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_update_config_with_bad_easing_changes_nothing() {
        let scheduler = SchedulerHandle::new();
        let mut acc = faq(&scheduler).initially_active_section(1).build().unwrap();
        let before = acc.config().clone();

        let bad = AccordionConfig {
            duration: 999,
            easing: EasingSpec::named("easeInNope"),
            ..before.clone()
        };
        assert!(acc.update_config(bad).is_err());

        assert_eq!(acc.config(), &before);
        for k in 0..3 {
            let section = acc.collapsible(k).unwrap().config();
            assert_eq!(section.duration, 300);
            assert_eq!(section.easing, before.easing);
        }
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_set_sections_resizes() {
        let mut acc = faq(&SchedulerHandle::new()).build().unwrap();
        acc.set_sections(vec!["only"]).unwrap();
        assert_eq!(acc.sections().len(), 1);
        assert!(acc.collapsible(1).is_none());

        acc.set_sections(vec!["a", "b", "c", "d"]).unwrap();
        assert!(acc.collapsible(3).unwrap().is_collapsed());
    }
}
