//! Synthetic single-volume images with Rock Ridge names
//!
//! Layout: system area (sectors 0-15), PVD (16), terminator (17), type L
//! and type M path tables, directory extents in level order, then file data.
//! ISO-level names are upper-cased and truncated to 8.3 (`;1` on files);
//! the original names travel in Rock Ridge `NM` entries.

use crate::common::MemoryBlockDevice;
use std::collections::{BTreeMap, VecDeque};

pub const SECTOR: usize = 2048;
pub const PVD_OFFSET: usize = 16 * SECTOR;
pub const TERMINATOR_OFFSET: usize = 17 * SECTOR;
pub const FIRST_FREE_LBA: u32 = 18;

/// Recording date stamped on every directory record: 2018-01-02 03:04:05 GMT
pub const RECORDED_AT: [u8; 7] = [118, 1, 2, 3, 4, 5, 0];

enum Node {
    Dir(BTreeMap<String, Node>),
    File {
        content: Vec<u8>,
        system_use: Option<Vec<u8>>,
    },
}

pub struct IsoBuilder {
    root: BTreeMap<String, Node>,
    volume_id: String,
    rock_ridge: bool,
}

struct DirLayout<'a> {
    iso_name: String,
    parent: usize,
    entries: Vec<EntryLayout<'a>>,
    lba: u32,
    size: u32,
}

struct EntryLayout<'a> {
    name: &'a str,
    iso_name: String,
    target: Target<'a>,
}

enum Target<'a> {
    Dir(usize),
    File {
        content: &'a [u8],
        system_use: Option<&'a [u8]>,
        lba: u32,
    },
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
            volume_id: String::from("CDROM"),
            rock_ridge: true,
        }
    }

    /// `dir1`, `dir2/dir3` and their files
    pub fn basic() -> Self {
        Self::new()
            .file("/dir1/file2.txt", b"some content 2\n")
            .file("/dir2/dir3/file4.txt", b"some content 4\n")
            .file("/dir2/dir3/file5.txt", b"some content 5\n")
            .file("/dir2/file3.txt", b"some content 3\n")
            .file("/dir2/long_file_name.txt", b"some content 6\n")
            .file("/file1.txt", b"some content 1\n")
    }

    /// [`IsoBuilder::basic`] plus `long_dir_name/long_sub_dir_name`
    pub fn fixture() -> Self {
        Self::basic().file(
            "/long_dir_name/long_sub_dir_name/long_file_name_2.txt",
            b"some content 7\n",
        )
    }

    pub fn volume_id(mut self, id: &str) -> Self {
        self.volume_id = id.to_string();
        self
    }

    /// Leave out every Rock Ridge entry
    pub fn without_rock_ridge(mut self) -> Self {
        self.rock_ridge = false;
        self
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.insert(path, Node::Dir(BTreeMap::new()));
        self
    }

    pub fn file(mut self, path: &str, content: &[u8]) -> Self {
        self.insert(
            path,
            Node::File {
                content: content.to_vec(),
                system_use: None,
            },
        );
        self
    }

    /// File whose System Use area is exactly `system_use`
    pub fn file_with_system_use(mut self, path: &str, content: &[u8], system_use: Vec<u8>) -> Self {
        self.insert(
            path,
            Node::File {
                content: content.to_vec(),
                system_use: Some(system_use),
            },
        );
        self
    }

    fn insert(&mut self, path: &str, node: Node) {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let leaf = parts.pop().expect("path names an entry");
        let mut dir = &mut self.root;
        for part in parts {
            let next = dir
                .entry(part.to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            dir = match next {
                Node::Dir(children) => children,
                Node::File { .. } => panic!("{part} is a file"),
            };
        }
        match node {
            Node::Dir(_) => {
                dir.entry(leaf.to_string()).or_insert(node);
            }
            Node::File { .. } => {
                dir.insert(leaf.to_string(), node);
            }
        }
    }

    pub fn build_device(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.build())
    }

    pub fn build(&self) -> Vec<u8> {
        let mut dirs = self.layout();

        // path tables
        let table_size = path_table(&dirs, false).len();
        let table_sectors = table_size.div_ceil(SECTOR) as u32;
        let l_table_lba = FIRST_FREE_LBA;
        let m_table_lba = l_table_lba + table_sectors;
        let mut next_lba = m_table_lba + table_sectors;

        // directory extents: sizes do not depend on locations
        for i in 0..dirs.len() {
            let size = self.directory_extent(&dirs, i).len() as u32;
            dirs[i].size = size;
            dirs[i].lba = next_lba;
            next_lba += size / SECTOR as u32;
        }

        // file data
        for dir in dirs.iter_mut() {
            for entry in dir.entries.iter_mut() {
                if let Target::File { content, lba, .. } = &mut entry.target {
                    *lba = next_lba;
                    next_lba += content.len().div_ceil(SECTOR) as u32;
                }
            }
        }

        let total_sectors = next_lba as usize + 1;
        let mut image = vec![0u8; total_sectors * SECTOR];

        self.write_pvd(&mut image, &dirs, total_sectors as u32, table_size as u32, l_table_lba, m_table_lba);

        let t = TERMINATOR_OFFSET;
        image[t] = 255;
        image[t + 1..t + 6].copy_from_slice(b"CD001");
        image[t + 6] = 1;

        let l_table = path_table(&dirs, false);
        let m_table = path_table(&dirs, true);
        write_at(&mut image, l_table_lba, &l_table);
        write_at(&mut image, m_table_lba, &m_table);

        for i in 0..dirs.len() {
            let extent = self.directory_extent(&dirs, i);
            write_at(&mut image, dirs[i].lba, &extent);
        }
        for dir in &dirs {
            for entry in &dir.entries {
                if let Target::File { content, lba, .. } = entry.target {
                    write_at(&mut image, lba, content);
                }
            }
        }

        image
    }

    /// Directories in level order, children sorted by ISO name
    fn layout(&self) -> Vec<DirLayout<'_>> {
        let mut dirs = vec![DirLayout {
            iso_name: String::from("\0"),
            parent: 1,
            entries: Vec::new(),
            lba: 0,
            size: 0,
        }];
        let mut queue = VecDeque::from([(0usize, &self.root)]);

        while let Some((index, children)) = queue.pop_front() {
            let mut sorted: Vec<(String, &String, &Node)> = children
                .iter()
                .map(|(name, node)| (iso_name(name, matches!(node, Node::Dir(_))), name, node))
                .collect();
            sorted.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));

            let mut entries = Vec::new();
            for (iso, name, node) in sorted {
                match node {
                    Node::Dir(grandchildren) => {
                        dirs.push(DirLayout {
                            iso_name: iso.clone(),
                            parent: index + 1,
                            entries: Vec::new(),
                            lba: 0,
                            size: 0,
                        });
                        let child = dirs.len() - 1;
                        queue.push_back((child, grandchildren));
                        entries.push(EntryLayout {
                            name,
                            iso_name: iso,
                            target: Target::Dir(child),
                        });
                    }
                    Node::File {
                        content,
                        system_use,
                    } => entries.push(EntryLayout {
                        name,
                        iso_name: iso,
                        target: Target::File {
                            content,
                            system_use: system_use.as_deref(),
                            lba: 0,
                        },
                    }),
                }
            }
            dirs[index].entries = entries;
        }
        dirs
    }

    fn directory_extent(&self, dirs: &[DirLayout<'_>], index: usize) -> Vec<u8> {
        let dir = &dirs[index];
        let parent = &dirs[dir.parent - 1];
        let mut records = Vec::new();

        let mut self_su = Vec::new();
        let mut parent_su = Vec::new();
        if self.rock_ridge {
            if index == 0 {
                self_su.extend(susp(b"SP", &[0xBE, 0xEF, 0]));
            }
            self_su.extend(susp(b"RR", &[0x81]));
            self_su.extend(susp(b"NM", &[0x02]));
            parent_su.extend(susp(b"RR", &[0x81]));
            parent_su.extend(susp(b"NM", &[0x04]));
        }
        records.push(record(&[0], dir.lba, dir.size, 0x02, &self_su));
        records.push(record(&[1], parent.lba, parent.size, 0x02, &parent_su));

        for entry in &dir.entries {
            let generated = self.rock_ridge_entries(entry.name);
            let (lba, size, flags, su) = match entry.target {
                Target::Dir(child) => (dirs[child].lba, dirs[child].size, 0x02, generated.as_slice()),
                Target::File {
                    content,
                    system_use,
                    lba,
                } => (
                    lba,
                    content.len() as u32,
                    0x00,
                    system_use.unwrap_or(generated.as_slice()),
                ),
            };
            records.push(record(entry.iso_name.as_bytes(), lba, size, flags, su));
        }

        pack(&records)
    }

    fn rock_ridge_entries(&self, name: &str) -> Vec<u8> {
        if !self.rock_ridge {
            return Vec::new();
        }
        let mut su = susp(b"RR", &[0x89]);
        su.extend(susp(b"PX", &[0u8; 32]));
        let mut nm = vec![0u8];
        nm.extend_from_slice(name.as_bytes());
        su.extend(susp(b"NM", &nm));
        su
    }

    fn write_pvd(
        &self,
        image: &mut [u8],
        dirs: &[DirLayout<'_>],
        total_sectors: u32,
        table_size: u32,
        l_table_lba: u32,
        m_table_lba: u32,
    ) {
        let p = &mut image[PVD_OFFSET..PVD_OFFSET + SECTOR];
        p[0] = 1;
        p[1..6].copy_from_slice(b"CD001");
        p[6] = 1;
        padded(&mut p[8..40], "LINUX");
        padded(&mut p[40..72], &self.volume_id);
        both32(&mut p[80..88], total_sectors);
        both16(&mut p[120..124], 1);
        both16(&mut p[124..128], 1);
        both16(&mut p[128..132], SECTOR as u16);
        both32(&mut p[132..140], table_size);
        p[140..144].copy_from_slice(&l_table_lba.to_le_bytes());
        p[148..152].copy_from_slice(&m_table_lba.to_be_bytes());
        let root = record(&[0], dirs[0].lba, dirs[0].size, 0x02, &[]);
        p[156..190].copy_from_slice(&root);
        padded(&mut p[190..318], "");
        padded(&mut p[318..446], "PUBLISHER");
        padded(&mut p[446..574], "");
        padded(&mut p[574..702], "GENISOIMAGE ISO 9660/HFS FILESYSTEM CREATOR");
        padded(&mut p[702..813], "");
        p[813..830].copy_from_slice(b"2018010203040500\x00");
        p[830..847].copy_from_slice(b"2018010203040500\x00");
        p[847..864].copy_from_slice(b"0000000000000000\x00");
        p[864..881].copy_from_slice(b"0000000000000000\x00");
        p[881] = 1;
    }
}

/// Upper-cased ISO-level name, 8 characters for directories, 8.3 plus `;1` for files
pub fn iso_name(name: &str, is_dir: bool) -> String {
    let upper = name.to_ascii_uppercase();
    if is_dir {
        return upper.chars().take(8).collect();
    }
    let (stem, ext) = upper.rsplit_once('.').unwrap_or((upper.as_str(), ""));
    let stem: String = stem.chars().take(8).collect();
    let ext: String = ext.chars().take(3).collect();
    format!("{stem}.{ext};1")
}

/// One SUSP entry
pub fn susp(signature: &[u8; 2], payload: &[u8]) -> Vec<u8> {
    let mut entry = vec![signature[0], signature[1], (payload.len() + 4) as u8, 1];
    entry.extend_from_slice(payload);
    entry
}

/// One directory record, padded to an even length
pub fn record(name: &[u8], lba: u32, size: u32, flags: u8, system_use: &[u8]) -> Vec<u8> {
    let pad = usize::from(name.len() % 2 == 0);
    let mut len = 33 + name.len() + pad + system_use.len();
    len += len % 2;
    assert!(len <= 255, "directory record too long");

    let mut r = vec![0u8; len];
    r[0] = len as u8;
    both32(&mut r[2..10], lba);
    both32(&mut r[10..18], size);
    r[18..25].copy_from_slice(&RECORDED_AT);
    r[25] = flags;
    both16(&mut r[28..32], 1);
    r[32] = name.len() as u8;
    r[33..33 + name.len()].copy_from_slice(name);
    let su_start = 33 + name.len() + pad;
    r[su_start..su_start + system_use.len()].copy_from_slice(system_use);
    r
}

/// Records never straddle a sector; the extent is whole sectors
fn pack(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for r in records {
        let used = out.len() % SECTOR;
        if used + r.len() > SECTOR {
            out.resize(out.len() + SECTOR - used, 0);
        }
        out.extend_from_slice(r);
    }
    let sectors = out.len().div_ceil(SECTOR).max(1);
    out.resize(sectors * SECTOR, 0);
    out
}

fn path_table(dirs: &[DirLayout<'_>], big_endian: bool) -> Vec<u8> {
    let mut out = Vec::new();
    for dir in dirs {
        let name = dir.iso_name.as_bytes();
        out.push(name.len() as u8);
        out.push(0);
        if big_endian {
            out.extend_from_slice(&dir.lba.to_be_bytes());
            out.extend_from_slice(&(dir.parent as u16).to_be_bytes());
        } else {
            out.extend_from_slice(&dir.lba.to_le_bytes());
            out.extend_from_slice(&(dir.parent as u16).to_le_bytes());
        }
        out.extend_from_slice(name);
        if name.len() % 2 == 1 {
            out.push(0);
        }
    }
    out
}

fn write_at(image: &mut [u8], lba: u32, bytes: &[u8]) {
    let start = lba as usize * SECTOR;
    image[start..start + bytes.len()].copy_from_slice(bytes);
}

fn padded(dst: &mut [u8], text: &str) {
    dst.fill(b' ');
    dst[..text.len()].copy_from_slice(text.as_bytes());
}

fn both16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}

fn both32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}
