// Document-boundary IO: workbook read/write and canonical CSV loading

pub mod csv;
pub mod xlsx;
