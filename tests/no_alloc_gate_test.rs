use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tetrecs::core::{Board, Piece};
use tetrecs::types::PieceKind;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn placement_checks_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut board = Board::new(5, 5).unwrap();
    for x in 0..4 {
        board.set(x, 0, 1).unwrap();
        board.set(0, x, 1).unwrap();
    }

    let allocs = with_alloc_counting(|| {
        for kind in PieceKind::ALL {
            for steps in 0..4 {
                let piece = Piece::new(kind).rotate(steps);
                let _ = piece.cells();
                for y in -1..6 {
                    for x in -1..6 {
                        let _ = board.can_place(&piece, x, y);
                    }
                }
            }
        }

        for i in 0..5 {
            let _ = board.is_row_full(i);
            let _ = board.is_col_full(i);
        }
    });

    assert!(allocs == 0);
}
