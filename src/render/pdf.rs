//! Single-page PDF serialization with `pdf-writer`.
//!
//! Page descriptions use a top-left origin in the page's own unit. PDF user
//! space is bottom-left in points, so every coordinate is scaled and the y
//! axis flipped on the way out.

use std::collections::HashMap;
use std::sync::Arc;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::layout::{AssetKind, DrawOp, Font, PageDescription, TextRun};

use super::assets::{AssetStore, PreparedImage};
use super::ExportError;

/// Maps page coordinates to PDF points.
#[derive(Debug, Clone, Copy)]
struct Transform {
    scale: f32,
    height_pt: f32,
}

impl Transform {
    fn len(&self, v: f32) -> f32 {
        v * self.scale
    }

    fn x(&self, x: f32) -> f32 {
        x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.height_pt - y * self.scale
    }
}

struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

pub struct PdfExporter {
    assets: AssetStore,
}

impl PdfExporter {
    pub fn new(assets: AssetStore) -> Self {
        Self { assets }
    }

    /// Serializes `page` into a complete PDF file.
    ///
    /// Images that cannot be loaded are logged and left out; everything else
    /// on the page is still written.
    pub fn export(&self, page: &PageDescription) -> Result<Vec<u8>, ExportError> {
        check_geometry(page)?;

        let scale = page.size.unit.points_per_unit();
        let tf = Transform {
            scale,
            height_pt: page.size.height * scale,
        };

        let mut alloc = RefAlloc(0);
        let catalog_id = alloc.next();
        let pages_id = alloc.next();
        let page_id = alloc.next();
        let content_id = alloc.next();

        let mut pdf = Pdf::new();

        let font_refs: Vec<(Font, Ref)> = Font::ALL.iter().map(|&f| (f, alloc.next())).collect();
        for (font, id) in &font_refs {
            pdf.type1_font(*id)
                .base_font(Name(font.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let images = self.embed_images(page, &mut pdf, &mut alloc);

        let mut content = Content::new();
        for op in &page.ops {
            match op {
                DrawOp::Rect { x, y, w, h, line_width } => {
                    content.set_line_width(tf.len(*line_width));
                    content.rect(tf.x(*x), tf.y(y + h), tf.len(*w), tf.len(*h));
                    content.stroke();
                }
                DrawOp::Line { x1, y1, x2, y2, line_width } => {
                    content.set_line_width(tf.len(*line_width));
                    content.move_to(tf.x(*x1), tf.y(*y1));
                    content.line_to(tf.x(*x2), tf.y(*y2));
                    content.stroke();
                }
                DrawOp::Text(run) => write_text(&mut content, run, page, &tf),
                DrawOp::Image { asset, x, y, w, h } => {
                    let Some((name, _)) = images.get(asset) else {
                        continue;
                    };
                    content.save_state();
                    content.transform([tf.len(*w), 0.0, 0.0, tf.len(*h), tf.x(*x), tf.y(y + h)]);
                    content.x_object(Name(name.as_bytes()));
                    content.restore_state();
                }
            }
        }

        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);

        let mut pdf_page = pdf.page(page_id);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, tf.len(page.size.width), tf.height_pt))
            .parent(pages_id)
            .contents(content_id);
        {
            let mut resources = pdf_page.resources();
            {
                let mut fonts = resources.fonts();
                for (font, id) in &font_refs {
                    fonts.pair(Name(font.resource_name().as_bytes()), *id);
                }
            }
            if !images.is_empty() {
                let mut x_objects = resources.x_objects();
                let mut named: Vec<&(String, Ref)> = images.values().collect();
                named.sort();
                for (name, id) in named {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }
        drop(pdf_page);

        Ok(pdf.finish())
    }

    /// Writes one image XObject per distinct asset the page uses.
    fn embed_images(
        &self,
        page: &PageDescription,
        pdf: &mut Pdf,
        alloc: &mut RefAlloc,
    ) -> HashMap<AssetKind, (String, Ref)> {
        let mut embedded = HashMap::new();
        for op in &page.ops {
            let DrawOp::Image { asset, .. } = op else {
                continue;
            };
            if embedded.contains_key(asset) {
                continue;
            }
            match self.assets.load(*asset) {
                Ok(image) => {
                    let name = format!("Im{}", embedded.len() + 1);
                    let id = write_image(pdf, alloc, &image);
                    embedded.insert(*asset, (name, id));
                }
                Err(e) => log::warn!("Skipping {}: {}", asset.file_stem(), e),
            }
        }
        embedded
    }
}

fn write_image(pdf: &mut Pdf, alloc: &mut RefAlloc, image: &Arc<PreparedImage>) -> Ref {
    let id = alloc.next();
    let mask_id = image.alpha.as_ref().map(|alpha| {
        let mask_id = alloc.next();
        let mut mask = pdf.image_xobject(mask_id, alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_id
    });

    let mut xobj = pdf.image_xobject(id, &image.rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(image.width as i32);
    xobj.height(image.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobj.s_mask(mask_id);
    }
    id
}

fn write_text(content: &mut Content, run: &TextRun, page: &PageDescription, tf: &Transform) {
    let left = run.left_x(page.size.unit);
    let [r, g, b] = [run.color.0, run.color.1, run.color.2].map(|c| f32::from(c) / 255.0);
    let encoded = encode_win_ansi(&run.text);

    content.begin_text();
    content.set_fill_rgb(r, g, b);
    content.set_font(Name(run.font.resource_name().as_bytes()), run.size);
    content.next_line(tf.x(left), tf.y(run.y));
    content.show(Str(&encoded));
    content.end_text();
}

fn check_geometry(page: &PageDescription) -> Result<(), ExportError> {
    let size = page.size;
    if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0)
    {
        return Err(ExportError::PageSize {
            width: size.width,
            height: size.height,
        });
    }

    for (index, op) in page.ops.iter().enumerate() {
        let finite = match op {
            DrawOp::Rect { x, y, w, h, line_width } => [*x, *y, *w, *h, *line_width].iter().all(|v| v.is_finite()),
            DrawOp::Line { x1, y1, x2, y2, line_width } => {
                [*x1, *y1, *x2, *y2, *line_width].iter().all(|v| v.is_finite())
            }
            DrawOp::Text(run) => run.x.is_finite() && run.y.is_finite() && run.size.is_finite(),
            DrawOp::Image { x, y, w, h, .. } => [*x, *y, *w, *h].iter().all(|v| v.is_finite()),
        };
        if !finite {
            return Err(ExportError::NonFinite { index });
        }
    }
    Ok(())
}

/// Encodes text for a WinAnsi base-14 font. Characters the encoding has no
/// slot for become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}
