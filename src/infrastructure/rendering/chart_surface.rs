use std::collections::HashMap;

use derive_more::Display;
use strum::{AsRefStr, EnumString};

use super::canvas_chart::{clear_canvas, context_for, draw_chart};
use crate::domain::catalog::ChartDataset;
use crate::domain::errors::RenderingResult;
use crate::domain::logging::{LogComponent, get_logger};

/// Value Object - supported chart shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum ChartKind {
    #[display(fmt = "Bar")]
    #[strum(serialize = "bar")]
    Bar,
    #[display(fmt = "Doughnut")]
    #[strum(serialize = "doughnut")]
    Doughnut,
}

/// Presentation options attached to one chart instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub center_label: Option<String>,
}

impl ChartOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            center_label: None,
        }
    }

    /// Options for the import-progress donut with the percentage in the hole
    pub fn progress(percent: f64) -> Self {
        Self {
            title: "Import progress".to_string(),
            center_label: Some(format!("{percent:.0}%")),
        }
    }
}

#[derive(Debug, Clone)]
struct ChartInstance {
    kind: ChartKind,
    dataset: ChartDataset,
    options: ChartOptions,
}

/// Registry of live canvas charts keyed by target element id.
///
/// Rendering into an id that already holds a chart destroys the old instance
/// first, and rendering into an id with no canvas in the DOM is a successful
/// no-op so callers may draw before (or after) their markup is mounted.
#[derive(Default)]
pub struct ChartSurface {
    instances: HashMap<String, ChartInstance>,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn has_instance(&self, target_id: &str) -> bool {
        self.instances.contains_key(target_id)
    }

    /// Draw a fresh chart into `target_id`, replacing any previous instance
    pub fn render(
        &mut self,
        target_id: &str,
        kind: ChartKind,
        dataset: ChartDataset,
        options: ChartOptions,
    ) -> RenderingResult<()> {
        self.destroy(target_id)?;
        let Some((canvas, context)) = context_for(target_id)? else {
            get_logger().debug(
                LogComponent::Infrastructure("ChartSurface"),
                &format!("No canvas '{target_id}' in the DOM, skipping render"),
            );
            return Ok(());
        };
        draw_chart(&canvas, &context, kind, &dataset, &options)?;
        self.instances.insert(
            target_id.to_string(),
            ChartInstance {
                kind,
                dataset,
                options,
            },
        );
        get_logger().debug(
            LogComponent::Infrastructure("ChartSurface"),
            &format!("🎨 Rendered {kind} chart into '{target_id}'"),
        );
        Ok(())
    }

    /// Swap the data of an existing chart and repaint it, keeping its kind
    /// and options. Returns `Ok(false)` when the target holds no instance;
    /// the caller decides whether that warrants a full render.
    pub fn update(&mut self, target_id: &str, dataset: ChartDataset) -> RenderingResult<bool> {
        let Some(instance) = self.instances.get_mut(target_id) else {
            return Ok(false);
        };
        instance.dataset = dataset;
        let instance = &*instance;
        if let Some((canvas, context)) = context_for(target_id)? {
            draw_chart(
                &canvas,
                &context,
                instance.kind,
                &instance.dataset,
                &instance.options,
            )?;
        }
        Ok(true)
    }

    /// Update in place when a chart of the same kind is live, otherwise fall
    /// back to a full destroy-and-render cycle
    pub fn update_or_render(
        &mut self,
        target_id: &str,
        kind: ChartKind,
        dataset: ChartDataset,
        options: ChartOptions,
    ) -> RenderingResult<()> {
        if let Some(instance) = self.instances.get_mut(target_id) {
            if instance.kind == kind {
                instance.dataset = dataset;
                instance.options = options;
                let instance = &*instance;
                if let Some((canvas, context)) = context_for(target_id)? {
                    draw_chart(
                        &canvas,
                        &context,
                        instance.kind,
                        &instance.dataset,
                        &instance.options,
                    )?;
                }
                return Ok(());
            }
        }
        self.render(target_id, kind, dataset, options)
    }

    /// Drop the chart for `target_id` and blank its canvas if still mounted.
    /// Ids without an instance are left untouched.
    pub fn destroy(&mut self, target_id: &str) -> RenderingResult<()> {
        if self.instances.remove(target_id).is_none() {
            return Ok(());
        }
        if let Some((canvas, context)) = context_for(target_id)? {
            clear_canvas(&canvas, &context);
        }
        get_logger().debug(
            LogComponent::Infrastructure("ChartSurface"),
            &format!("🗑️ Destroyed chart '{target_id}'"),
        );
        Ok(())
    }

    /// Tear down every live chart, swallowing per-target draw failures so one
    /// broken canvas cannot keep the rest alive
    pub fn destroy_all(&mut self) {
        let targets: Vec<String> = self.instances.keys().cloned().collect();
        for target in targets {
            if let Err(e) = self.destroy(&target) {
                get_logger().warn(
                    LogComponent::Infrastructure("ChartSurface"),
                    &format!("Failed to clear chart '{target}': {e}"),
                );
            }
        }
    }
}

impl Drop for ChartSurface {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
