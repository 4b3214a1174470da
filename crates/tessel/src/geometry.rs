// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Rectangle operations over placed visuals: alignment, distribution, size
//! matching, rubber-band selection and grid snapping.
//!
//! Every operation is pure. It takes the selected visuals and returns new
//! copies in input order; selections below the minimum size come back unchanged.

use crate::visual::{PixelRect, SelectionRect, Visual};
use serde::{Deserialize, Serialize};

pub const MIN_ALIGN: usize = 2;
pub const MIN_DISTRIBUTE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}
impl Alignment {
    pub fn axis(&self) -> Axis {
        match self {
            Alignment::Left | Alignment::Center | Alignment::Right => Axis::Horizontal,
            Alignment::Top | Alignment::Middle | Alignment::Bottom => Axis::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMatch {
    Width,
    Height,
    Both,
}

/// Bounding box of a selection; the shared reference frame for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}
impl Bounds {
    pub fn of(visuals: &[Visual]) -> Option<Self> {
        let mut rects = visuals.iter().map(|v| v.position.normalized());
        let first = rects.next()?;
        Some(rects.fold(
            Bounds {
                left: first.x,
                top: first.y,
                right: first.right(),
                bottom: first.bottom(),
            },
            |b, r| Bounds {
                left: b.left.min(r.x),
                top: b.top.min(r.y),
                right: b.right.max(r.right()),
                bottom: b.bottom.max(r.bottom()),
            },
        ))
    }
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

pub fn align(visuals: &[Visual], alignment: Alignment) -> Vec<Visual> {
    let bounds = match Bounds::of(visuals) {
        Some(bounds) if visuals.len() >= MIN_ALIGN => bounds,
        _ => return visuals.to_vec(),
    };
    visuals
        .iter()
        .map(|visual| {
            let mut rect = visual.position;
            match alignment {
                Alignment::Left => rect.x = bounds.left,
                Alignment::Center => rect.x = bounds.center_x() - rect.width / 2.0,
                Alignment::Right => rect.x = bounds.right - rect.width,
                Alignment::Top => rect.y = bounds.top,
                Alignment::Middle => rect.y = bounds.center_y() - rect.height / 2.0,
                Alignment::Bottom => rect.y = bounds.bottom - rect.height,
            }
            visual.with_position(rect)
        })
        .collect()
}

/// Equal edge-to-edge spacing along `axis`. The first and last visuals along
/// the axis stay put; interior ones are laid out between them in order.
pub fn distribute(visuals: &[Visual], axis: Axis) -> Vec<Visual> {
    if visuals.len() < MIN_DISTRIBUTE {
        return visuals.to_vec();
    }
    let extent = |rect: &PixelRect| match axis {
        Axis::Horizontal => (rect.x, rect.width),
        Axis::Vertical => (rect.y, rect.height),
    };
    let mut order: Vec<usize> = (0..visuals.len()).collect();
    order.sort_by(|&a, &b| {
        let (start_a, _) = extent(&visuals[a].position);
        let (start_b, _) = extent(&visuals[b].position);
        start_a.total_cmp(&start_b)
    });
    let (first_start, _) = extent(&visuals[order[0]].position);
    let (last_start, last_size) = extent(&visuals[order[order.len() - 1]].position);
    let occupied: f64 = visuals.iter().map(|v| extent(&v.position).1).sum();
    let gap = (last_start + last_size - first_start - occupied) / (visuals.len() - 1) as f64;

    let mut result = visuals.to_vec();
    let (_, first_size) = extent(&visuals[order[0]].position);
    let mut cursor = first_start + first_size + gap;
    for &index in &order[1..order.len() - 1] {
        let rect = &mut result[index].position;
        match axis {
            Axis::Horizontal => rect.x = cursor,
            Axis::Vertical => rect.y = cursor,
        }
        cursor += extent(rect).1 + gap;
    }
    result
}

/// Sets widths, heights or both to `explicit` when given, else to the largest
/// in the selection.
pub fn match_size(visuals: &[Visual], mode: SizeMatch, explicit: Option<f64>) -> Vec<Visual> {
    if visuals.len() < MIN_ALIGN {
        return visuals.to_vec();
    }
    let largest = |pick: fn(&PixelRect) -> f64| {
        explicit.unwrap_or_else(|| {
            visuals
                .iter()
                .map(|v| pick(&v.position))
                .fold(f64::MIN, f64::max)
        })
    };
    let width = matches!(mode, SizeMatch::Width | SizeMatch::Both).then(|| largest(|r| r.width));
    let height =
        matches!(mode, SizeMatch::Height | SizeMatch::Both).then(|| largest(|r| r.height));
    visuals
        .iter()
        .map(|visual| {
            let mut rect = visual.position;
            if let Some(width) = width {
                rect.width = width;
            }
            if let Some(height) = height {
                rect.height = height;
            }
            visual.with_position(rect)
        })
        .collect()
}

/// Ids of the visuals touched by a drag box, which may be inverted.
pub fn visuals_in_selection_box(visuals: &[Visual], selection: &SelectionRect) -> Vec<String> {
    let selection = selection.normalized();
    visuals
        .iter()
        .filter(|v| selection.intersects(&v.position))
        .map(|v| v.id.clone())
        .collect()
}

pub fn translate(visuals: &[Visual], dx: f64, dy: f64) -> Vec<Visual> {
    visuals
        .iter()
        .map(|visual| {
            let mut rect = visual.position;
            rect.x += dx;
            rect.y += dy;
            visual.with_position(rect)
        })
        .collect()
}

/// Nearest multiple of `grid_size`; a non-positive grid leaves the value alone.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

pub fn snap_rect(rect: &PixelRect, grid_size: f64, snap_sizes: bool) -> PixelRect {
    let mut snapped = PixelRect::new(
        snap_to_grid(rect.x, grid_size),
        snap_to_grid(rect.y, grid_size),
        rect.width,
        rect.height,
    );
    if snap_sizes {
        snapped.width = snap_to_grid(rect.width, grid_size);
        snapped.height = snap_to_grid(rect.height, grid_size);
    }
    snapped
}

pub fn snap_visuals(visuals: &[Visual], grid_size: f64, snap_sizes: bool) -> Vec<Visual> {
    visuals
        .iter()
        .map(|v| v.with_position(snap_rect(&v.position, grid_size, snap_sizes)))
        .collect()
}
