//! Flat linear buffers.
//!
//! Used where a device cannot write volumetric surfaces: vectors are kept
//! as raw interleaved components with no padding channel.

use gvf_core::{ElementType, SurfaceData};

/// A flat buffer of `cells * components` channels.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearBuffer {
    cells: usize,
    components: usize,
    data: SurfaceData,
}

impl LinearBuffer {
    /// A zero-filled buffer.
    pub fn zeros(cells: usize, components: usize, element: ElementType) -> Self {
        Self {
            cells,
            components,
            data: SurfaceData::zeros(element, cells * components),
        }
    }

    /// Number of cells.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Components stored per cell.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Element type of each component.
    pub fn element(&self) -> ElementType {
        self.data.element()
    }

    /// Raw backing storage.
    pub fn data(&self) -> &SurfaceData {
        &self.data
    }

    /// Mutable raw backing storage.
    pub fn data_mut(&mut self) -> &mut SurfaceData {
        &mut self.data
    }

    /// Decode one cell; lanes past `components` are zero.
    pub fn load(&self, cell: usize) -> [f32; 4] {
        self.data.load(cell, self.components)
    }

    /// Size in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.cells * self.components * self.element().bytes()
    }
}
