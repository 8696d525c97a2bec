use std::fmt;

use crate::constants::INVALID_ADDRESS;
use crate::error::TranslationError;
use crate::page_table::ProcessId;

/// A logical address split into its page number and in-page offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: i64,
    pub page: usize,
    pub offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw address for the given page size.
    ///
    /// Negative addresses are rejected outright rather than left to the
    /// sign rules of integer division.
    pub fn decompose(
        raw: i64,
        page_size: usize,
        process: ProcessId,
    ) -> Result<Self, TranslationError> {
        let invalid = TranslationError::InvalidAddress { process, address: raw };

        let addr = usize::try_from(raw).map_err(|_| invalid)?;
        let page = addr.checked_div(page_size).ok_or(invalid)?;
        let offset = addr % page_size;

        Ok(LogicalAddress { raw, page, offset })
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LA({}) = (page={}, offset={})", self.raw, self.page, self.offset)
    }
}

/// PA = frame * page_size + offset
#[inline]
pub fn physical_address(frame: usize, offset: usize, page_size: usize) -> usize {
    frame * page_size + offset
}

/// Map a process's frame list and a logical address to a physical address
pub fn translate(
    process: ProcessId,
    frames: &[usize],
    raw: i64,
    page_size: usize,
) -> Result<usize, TranslationError> {
    let la = LogicalAddress::decompose(raw, page_size, process)?;

    let frame = frames
        .get(la.page)
        .copied()
        .ok_or(TranslationError::InvalidAddress { process, address: raw })?;

    Ok(physical_address(frame, la.offset, page_size))
}

/// Collapse a translation outcome to the batch output format (-1 for errors)
pub fn to_output(result: &Result<usize, TranslationError>) -> i64 {
    match result {
        Ok(pa) => i64::try_from(*pa).unwrap_or(INVALID_ADDRESS),
        Err(_) => INVALID_ADDRESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PID: ProcessId = ProcessId::new(1);

    #[test]
    fn test_decompose() {
        let la = LogicalAddress::decompose(600, 256, PID).unwrap();
        assert_eq!(la.page, 2);
        assert_eq!(la.offset, 88);
        assert_eq!(la.raw, 600);

        let la = LogicalAddress::decompose(0, 256, PID).unwrap();
        assert_eq!((la.page, la.offset), (0, 0));

        let la = LogicalAddress::decompose(255, 256, PID).unwrap();
        assert_eq!((la.page, la.offset), (0, 255));
    }

    #[test]
    fn test_decompose_negative_rejected() {
        let result = LogicalAddress::decompose(-1, 256, PID);
        assert_eq!(
            result,
            Err(TranslationError::InvalidAddress { process: PID, address: -1 })
        );
    }

    #[test]
    fn test_decompose_zero_page_size_rejected() {
        assert!(LogicalAddress::decompose(10, 0, PID).is_err());
    }

    #[test]
    fn test_display() {
        let la = LogicalAddress::decompose(600, 256, PID).unwrap();
        let display = format!("{}", la);
        assert!(display.contains("600"));
        assert!(display.contains("page=2"));
        assert!(display.contains("offset=88"));
    }

    #[test]
    fn test_physical_address() {
        assert_eq!(physical_address(0, 0, 256), 0);
        assert_eq!(physical_address(3, 10, 256), 778);
    }

    // =========================================================================
    // Translation against a frame list
    // =========================================================================

    #[test]
    fn test_translate_uses_page_order() {
        // Logical page 0 lives in frame 5, page 1 in frame 2
        let frames = [5, 2];
        assert_eq!(translate(PID, &frames, 10, 256), Ok(5 * 256 + 10));
        assert_eq!(translate(PID, &frames, 256, 256), Ok(2 * 256));
        assert_eq!(translate(PID, &frames, 511, 256), Ok(2 * 256 + 255));
    }

    #[test]
    fn test_translate_one_past_end() {
        let frames = [0, 1];
        assert_eq!(
            translate(PID, &frames, 512, 256),
            Err(TranslationError::InvalidAddress { process: PID, address: 512 })
        );
    }

    #[test]
    fn test_to_output() {
        assert_eq!(to_output(&Ok(4608)), 4608);
        assert_eq!(to_output(&Err(TranslationError::UnknownProcess(PID))), -1);
        assert_eq!(
            to_output(&Err(TranslationError::InvalidAddress { process: PID, address: 9 })),
            -1
        );
    }
}
