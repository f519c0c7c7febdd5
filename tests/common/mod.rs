#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

pub const PAGE_HEIGHT: i64 = 842;
pub const FONT_SIZE: i64 = 8;
pub const A4: [i64; 4] = [0, 0, 595, PAGE_HEIGHT];

/// A text run placed with its left edge at `x` and its baseline `top` points
/// below the top of the page.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    pub x: i64,
    pub top: i64,
    pub text: &'a str,
}

/// All runs of one visual line.
pub fn line<'a>(top: i64, cells: &[(i64, &'a str)]) -> Vec<Run<'a>> {
    cells
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|&(x, text)| Run { x, top, text })
        .collect()
}

/// Font registered as `F1` on every page.
#[derive(Debug, Clone)]
pub enum FixtureFont {
    Courier,
    /// Helvetica with an explicit `Widths` array starting at `first_char`.
    Widths { first_char: i64, widths: Vec<i64> },
    /// Type0 font with Identity-H codes mapped to text only by a ToUnicode
    /// CMap of `(code, char)` pairs.
    Identity { to_unicode: Vec<(u16, char)>, width: i64 },
}

pub fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

pub fn num(value: f32) -> Object {
    Object::Real(value)
}

pub fn text(value: &str) -> Object {
    Object::string_literal(value)
}

pub fn hex(codes: &[u16]) -> Object {
    let bytes = codes.iter().flat_map(|code| code.to_be_bytes()).collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn to_unicode_cmap(pairs: &[(u16, char)]) -> String {
    let entries = pairs
        .iter()
        .map(|(code, ch)| format!("<{code:04X}> <{:04X}>", u32::from(*ch)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n\
         {} beginbfchar\n{entries}\nendbfchar\n\
         endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
        pairs.len()
    )
}

fn add_font(doc: &mut Document, font: &FixtureFont) -> ObjectId {
    match font {
        FixtureFont::Courier => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        }),
        FixtureFont::Widths { first_char, widths } => {
            let last_char = first_char + i64::try_from(widths.len()).unwrap_or(1) - 1;
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "FirstChar" => *first_char,
                "LastChar" => last_char,
                "Widths" => widths.iter().map(|width| Object::Integer(*width)).collect::<Vec<_>>(),
            })
        }
        FixtureFont::Identity { to_unicode, width } => {
            let descriptor_id = doc.add_object(dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => "FixtureSans",
                "Flags" => 4,
                "FontBBox" => vec![0.into(), (-200).into(), 1000.into(), 800.into()],
                "ItalicAngle" => 0,
                "Ascent" => 800,
                "Descent" => -200,
                "CapHeight" => 700,
                "StemV" => 80,
            });
            let cid_font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType2",
                "BaseFont" => "FixtureSans",
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::string_literal("Adobe"),
                    "Ordering" => Object::string_literal("Identity"),
                    "Supplement" => 0,
                },
                "FontDescriptor" => descriptor_id,
                "DW" => *width,
            });
            let cmap_id = doc.add_object(Stream::new(
                dictionary! {},
                to_unicode_cmap(to_unicode).into_bytes(),
            ));
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => "FixtureSans",
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![cid_font_id.into()],
                "ToUnicode" => cmap_id,
            })
        }
    }
}

/// Writes one page per operation list. `media_box` sits on the page tree
/// root so every page inherits it; `None` leaves pages without one.
pub fn create_raw_pdf(
    path: &Path,
    font: &FixtureFont,
    media_box: Option<[i64; 4]>,
    pages: &[Vec<Operation>],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = add_font(&mut doc, font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for operations in pages {
        let content = Content {
            operations: operations.clone(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let mut root = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
        "Count" => i64::try_from(page_ids.len())?,
        "Resources" => resources_id,
    };
    if let Some(media_box) = media_box {
        root.set(
            "MediaBox",
            media_box.iter().map(|value| (*value).into()).collect::<Vec<Object>>(),
        );
    }
    doc.objects.insert(pages_id, Object::Dictionary(root));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)?;
    Ok(())
}

pub fn create_positioned_pdf(
    path: &Path,
    pages: &[Vec<Run<'_>>],
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = pages
        .iter()
        .map(|runs| {
            let mut operations = vec![
                op("BT", vec![]),
                op("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
            ];
            for run in runs {
                operations.push(op(
                    "Tm",
                    vec![
                        Object::Integer(1),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(1),
                        Object::Integer(run.x),
                        Object::Integer(PAGE_HEIGHT - run.top),
                    ],
                ));
                operations.push(op("Tj", vec![text(run.text)]));
            }
            operations.push(op("ET", vec![]));
            operations
        })
        .collect::<Vec<_>>();

    create_raw_pdf(path, &FixtureFont::Courier, Some(A4), &pages)
}
