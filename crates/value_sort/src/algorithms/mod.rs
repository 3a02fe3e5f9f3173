pub mod heap_sort;
mod hole;
