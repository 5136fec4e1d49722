/// Export planning: serialize catalog records into an ordered list of
/// layout blocks, independent of the PDF backend. Keeping this stage pure
/// makes the published filter, ordering, and page-break rules testable
/// without rendering anything.
use chrono::Local;

use crate::state::catalog::ProjectRecord;

/// Fixed output name for the bulk export
pub const PORTFOLIO_FILENAME: &str = "Portfolio_Projects_Overview.pdf";

/// One block of the printable document, consumed in order by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Bulk-export cover: portfolio title and generation date
    Cover { title: String, generated_on: String },
    /// Forced page break
    PageBreak,
    Title(String),
    Subtitle(String),
    SectionHeading(String),
    Paragraph(String),
    /// An image with its caption; the renderer keeps the pair together
    /// across page breaks
    Figure { path: String, caption: String },
}

/// Plan the printable document for a single record
pub fn plan_single(record: &ProjectRecord) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(record.title.clone()),
        Block::Subtitle(record.subtitle.clone()),
    ];

    for paragraph in record.paragraphs() {
        blocks.push(Block::Paragraph(paragraph.to_string()));
    }

    // Only entries with an actual asset make it into the document;
    // placeholders have nothing to print
    let figures: Vec<Block> = record
        .images
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            entry.path().map(|path| Block::Figure {
                path: path.to_string(),
                caption: entry.display_caption(i),
            })
        })
        .collect();

    if !figures.is_empty() {
        blocks.push(Block::SectionHeading("Images".to_string()));
        blocks.extend(figures);
    }

    blocks
}

/// Plan the bulk document: a cover block, then every published record,
/// each preceded by a forced page break. Unpublished records are excluded.
/// Returns None when nothing is published.
pub fn plan_portfolio(records: &[ProjectRecord]) -> Option<Vec<Block>> {
    let published: Vec<&ProjectRecord> = records.iter().filter(|r| r.published).collect();
    if published.is_empty() {
        return None;
    }

    let mut blocks = vec![Block::Cover {
        title: "Project Portfolio".to_string(),
        generated_on: Local::now().format("%B %e, %Y").to_string(),
    }];

    for record in published {
        blocks.push(Block::PageBreak);
        blocks.extend(plan_single(record));
    }

    Some(blocks)
}

/// Filename for a single-record export: the title with whitespace runs
/// normalized to single underscores, suffixed `_Overview.pdf`
pub fn single_filename(title: &str) -> String {
    let normalized: Vec<&str> = title.split_whitespace().collect();
    format!("{}_Overview.pdf", normalized.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::GalleryImage;

    fn record(title: &str, published: bool) -> ProjectRecord {
        ProjectRecord {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.into(),
            subtitle: "Category · Subcategory".into(),
            thumbnail: None,
            hero_image: None,
            description: "Alpha.\n\nBeta.".into(),
            pdf_url: None,
            featured: false,
            published,
            images: vec![],
        }
    }

    #[test]
    fn test_single_plan_order() {
        let mut r = record("Inlet Study", true);
        r.images = vec![
            GalleryImage::Captioned {
                path: "a.png".into(),
                caption: "Shock train".into(),
            },
            GalleryImage::Placeholder { caption: None },
        ];

        let blocks = plan_single(&r);
        assert_eq!(
            blocks,
            vec![
                Block::Title("Inlet Study".into()),
                Block::Subtitle("Category · Subcategory".into()),
                Block::Paragraph("Alpha.".into()),
                Block::Paragraph("Beta.".into()),
                Block::SectionHeading("Images".into()),
                Block::Figure {
                    path: "a.png".into(),
                    caption: "Shock train".into()
                },
            ],
            "placeholder entries carry no asset and are not exported"
        );
    }

    #[test]
    fn test_no_images_section_without_assets() {
        let mut r = record("Bare", true);
        r.images = vec![GalleryImage::Placeholder { caption: None }];

        let blocks = plan_single(&r);
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, Block::SectionHeading(_) | Block::Figure { .. })));
    }

    #[test]
    fn test_portfolio_skips_unpublished() {
        // Six records, 3-6 unpublished drafts
        let records = vec![
            record("One", true),
            record("Two", true),
            record("Three", false),
            record("Four", false),
            record("Five", false),
            record("Six", false),
        ];

        let blocks = plan_portfolio(&records).unwrap();

        assert!(
            matches!(blocks[0], Block::Cover { .. }),
            "cover block comes first"
        );

        let titles: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Title(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);

        // Every title is immediately preceded (at block level) by a break
        for (i, block) in blocks.iter().enumerate() {
            if matches!(block, Block::Title(_)) {
                assert_eq!(blocks[i - 1], Block::PageBreak);
            }
        }
    }

    #[test]
    fn test_portfolio_with_nothing_published() {
        let records = vec![record("Draft", false)];
        assert_eq!(plan_portfolio(&records), None);
    }

    #[test]
    fn test_single_filename_normalizes_whitespace() {
        assert_eq!(
            single_filename("Orbital Debris Tracker"),
            "Orbital_Debris_Tracker_Overview.pdf"
        );
        assert_eq!(
            single_filename("  Odd \t spacing  here "),
            "Odd_spacing_here_Overview.pdf"
        );
    }
}
