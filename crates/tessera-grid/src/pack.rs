//! Two-pass packing of grid data into flat byte buffers.
//!
//! A caller first sizes the transfer with [`pack_request`], allocates a
//! [`PackBuffer`] of that capacity, then runs [`pack`]. [`unpack`] reverses
//! it on the receiving side with the same iterator and property selection.
//!
//! The wire format has no header: for each key the iterator yields, the
//! selected properties are written in declaration order, each as its `f32`
//! components in little-endian byte order, tightly packed.

use log::trace;
use tessera_core::{PropertyId, PropertySet};

use crate::error::PackError;
use crate::grid::Grid;
use crate::iter::GridIter;
use crate::layout::PropertyLayout;
use crate::store::BackingStore;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Caller-sized output buffer for [`pack`].
#[derive(Clone, Debug, Default)]
pub struct PackBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl PackBuffer {
    /// An empty buffer that accepts at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    /// The written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Discard the written bytes, keeping the capacity.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    fn reserve(&self, requested: usize) -> Result<(), PackError> {
        if requested > self.remaining() {
            return Err(PackError::BufferOverflow {
                requested,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    fn put(&mut self, values: &[f32]) {
        for v in values {
            self.bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// Read cursor over packed bytes for [`unpack`].
#[derive(Clone, Debug)]
pub struct UnpackBuffer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> UnpackBuffer<'a> {
    /// A cursor at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn reserve(&self, requested: usize) -> Result<(), PackError> {
        if requested > self.remaining() {
            return Err(PackError::BufferUnderflow {
                requested,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    fn take(&mut self, out: &mut [f32]) {
        for v in out {
            let mut buf = [0u8; F32_BYTES];
            buf.copy_from_slice(&self.bytes[self.pos..self.pos + F32_BYTES]);
            *v = f32::from_le_bytes(buf);
            self.pos += F32_BYTES;
        }
    }
}

/// Running totals across pack/unpack calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackStat {
    requests: usize,
    bytes: usize,
}

impl PackStat {
    /// Count one more pack or unpack request.
    pub fn inc_req(&mut self) {
        self.requests += 1;
    }

    /// Requests counted so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Bytes moved so far.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

fn selected_bytes(
    layout: &PropertyLayout,
    props: &PropertySet,
) -> Result<(Vec<PropertyId>, usize), PackError> {
    let selected = layout.select(props)?;
    let per_element = layout.components_of(&selected) * F32_BYTES;
    Ok((selected, per_element))
}

/// Add to `req` the bytes [`pack`] will write for the keys `it` has left.
///
/// Reads no element data and does not advance `it`.
pub fn pack_request<S: BackingStore>(
    grid: &Grid<S>,
    props: &PropertySet,
    it: &GridIter,
    req: &mut usize,
) -> Result<(), PackError> {
    grid.check_stamp(it.stamp())?;
    let (_, per_element) = selected_bytes(grid.layout(), props)?;
    *req += it.len() * per_element;
    Ok(())
}

/// Write the selected properties of every remaining key of `it` into `buf`.
///
/// Fails without writing anything if the iterator is stale, the grid is
/// not active, a property is unknown, or `buf` is too small.
pub fn pack<S: BackingStore>(
    grid: &Grid<S>,
    props: &PropertySet,
    it: &mut GridIter,
    buf: &mut PackBuffer,
    stat: &mut PackStat,
) -> Result<(), PackError> {
    grid.check_stamp(it.stamp())?;
    let store = grid.store()?;
    let (selected, per_element) = selected_bytes(grid.layout(), props)?;
    let total = it.len() * per_element;
    buf.reserve(total)?;

    for key in it {
        let slot = grid.offset(&key)?;
        for &prop in &selected {
            buf.put(store.property(slot, prop));
        }
    }
    stat.bytes += total;
    trace!("packed {total} bytes, {} properties per element", selected.len());
    Ok(())
}

/// Read the selected properties of every remaining key of `it` from `buf`.
///
/// Fails without modifying the grid if the iterator is stale, the grid is
/// not active, a property is unknown, or `buf` holds too few bytes.
pub fn unpack<S: BackingStore>(
    grid: &mut Grid<S>,
    props: &PropertySet,
    it: &mut GridIter,
    buf: &mut UnpackBuffer<'_>,
    stat: &mut PackStat,
) -> Result<(), PackError> {
    grid.check_stamp(it.stamp())?;
    grid.store()?;
    let (selected, per_element) = selected_bytes(grid.layout(), props)?;
    let total = it.len() * per_element;
    buf.reserve(total)?;

    for key in it {
        let slot = grid.offset(&key)?;
        let store = grid.store_mut()?;
        for &prop in &selected {
            buf.take(store.property_mut(slot, prop));
        }
    }
    stat.bytes += total;
    trace!("unpacked {total} bytes, {} properties per element", selected.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aos::AosStore;
    use crate::soa::SoaStore;
    use tessera_core::{GridError, GridKey, PropertyDef};

    fn grid<S: BackingStore>() -> Grid<S> {
        let layout = PropertyLayout::new(&[
            PropertyDef::scalar("a"),
            PropertyDef::vector("b", 2),
            PropertyDef::scalar("c"),
        ])
        .unwrap();
        let mut g = Grid::with_extents(&[4, 3], layout).unwrap();
        g.activate();
        let keys: Vec<GridKey> = g.iter().collect();
        for (n, k) in keys.iter().enumerate() {
            let n = n as f32;
            g.get_mut(PropertyId(0), k).unwrap()[0] = n;
            g.get_mut(PropertyId(1), k)
                .unwrap()
                .copy_from_slice(&[n + 0.5, n + 0.25]);
            g.get_mut(PropertyId(2), k).unwrap()[0] = -n;
        }
        g
    }

    #[test]
    fn request_counts_exact_bytes() {
        let g: Grid<AosStore> = grid();
        let it = g.iter();
        let mut req = 0;
        pack_request(&g, &PropertySet::empty(), &it, &mut req).unwrap();
        assert_eq!(req, 12 * 4 * 4);

        let only_b: PropertySet = [PropertyId(1)].into_iter().collect();
        let sub = g
            .sub_iter(&GridKey::from([1, 1]), &GridKey::from([2, 2]))
            .unwrap();
        pack_request(&g, &only_b, &sub, &mut req).unwrap();
        assert_eq!(req, 192 + 4 * 2 * 4);
    }

    #[test]
    fn wire_format_is_little_endian_in_declaration_order() {
        let g: Grid<SoaStore> = grid();
        let props: PropertySet = [PropertyId(2), PropertyId(0)].into_iter().collect();
        let mut it = g
            .sub_iter(&GridKey::from([1, 0]), &GridKey::from([1, 0]))
            .unwrap();
        let mut buf = PackBuffer::with_capacity(8);
        let mut stat = PackStat::default();
        pack(&g, &props, &mut it, &mut buf, &mut stat).unwrap();
        let mut expected = 1.0f32.to_le_bytes().to_vec();
        expected.extend_from_slice(&(-1.0f32).to_le_bytes());
        assert_eq!(buf.as_bytes(), expected.as_slice());
        assert_eq!(stat.bytes(), 8);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn sub_box_round_trip() {
        let src: Grid<AosStore> = grid();
        let start = GridKey::from([1, 0]);
        let stop = GridKey::from([3, 1]);
        let props = PropertySet::empty();

        let mut req = 0;
        let mut it = src.sub_iter(&start, &stop).unwrap();
        pack_request(&src, &props, &it, &mut req).unwrap();
        let mut buf = PackBuffer::with_capacity(req);
        let mut stat = PackStat::default();
        stat.inc_req();
        pack(&src, &props, &mut it, &mut buf, &mut stat).unwrap();
        assert_eq!(buf.len(), req);

        let mut dst: Grid<SoaStore> = Grid::new(src.shape().clone(), src.layout().clone());
        dst.activate();
        let mut it = dst.sub_iter(&start, &stop).unwrap();
        let mut rd = UnpackBuffer::new(buf.as_bytes());
        stat.inc_req();
        unpack(&mut dst, &props, &mut it, &mut rd, &mut stat).unwrap();
        assert_eq!(rd.remaining(), 0);
        assert_eq!(stat.requests(), 2);
        assert_eq!(stat.bytes(), 2 * req);

        for key in src.iter() {
            let inside = (0..2).all(|a| start[a] <= key[a] && key[a] <= stop[a]);
            let want = if inside {
                src.materialize(&key).unwrap().values().to_vec()
            } else {
                vec![0.0; 4]
            };
            assert_eq!(dst.materialize(&key).unwrap().values(), want.as_slice());
        }
    }

    #[test]
    fn overflow_writes_nothing() {
        let g: Grid<AosStore> = grid();
        let mut it = g.iter();
        let mut buf = PackBuffer::with_capacity(10);
        let mut stat = PackStat::default();
        assert_eq!(
            pack(&g, &PropertySet::empty(), &mut it, &mut buf, &mut stat),
            Err(PackError::BufferOverflow {
                requested: 192,
                remaining: 10
            })
        );
        assert!(buf.is_empty());
        assert_eq!(it.len(), 12);
    }

    #[test]
    fn underflow_leaves_grid_untouched() {
        let mut g: Grid<AosStore> = grid();
        let before = g.clone();
        let mut it = g.iter();
        let bytes = [0u8; 6];
        let mut rd = UnpackBuffer::new(&bytes);
        let mut stat = PackStat::default();
        assert!(matches!(
            unpack(&mut g, &PropertySet::empty(), &mut it, &mut rd, &mut stat),
            Err(PackError::BufferUnderflow { remaining: 6, .. })
        ));
        assert_eq!(g, before);
    }

    #[test]
    fn stale_iterator_is_rejected() {
        let mut g: Grid<AosStore> = grid();
        let mut it = g.iter();
        g.resize(&[2, 2]).unwrap();
        let mut buf = PackBuffer::with_capacity(1024);
        let mut stat = PackStat::default();
        assert!(matches!(
            pack(&g, &PropertySet::empty(), &mut it, &mut buf, &mut stat),
            Err(PackError::Grid(GridError::UseAfterRelease { .. }))
        ));
    }

    #[test]
    fn iterator_from_another_grid_is_rejected() {
        let big: Grid<AosStore> = grid();
        let mut small: Grid<AosStore> = Grid::with_extents(&[2, 2], big.layout().clone()).unwrap();
        small.activate();
        let before = small.clone();
        let props = PropertySet::empty();

        let mut it = big.iter();
        let mut buf = PackBuffer::with_capacity(1024);
        let mut stat = PackStat::default();
        assert!(matches!(
            pack(&small, &props, &mut it, &mut buf, &mut stat),
            Err(PackError::Grid(GridError::UseAfterRelease { .. }))
        ));
        assert!(buf.is_empty());
        assert_eq!(stat, PackStat::default());

        let bytes = vec![0u8; 1024];
        let mut rd = UnpackBuffer::new(&bytes);
        assert!(matches!(
            unpack(&mut small, &props, &mut it, &mut rd, &mut stat),
            Err(PackError::Grid(GridError::UseAfterRelease { .. }))
        ));
        assert_eq!(rd.position(), 0);
        assert_eq!(small, before);
        assert_eq!(it.len(), 12);
    }
}
