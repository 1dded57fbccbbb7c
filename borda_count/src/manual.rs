/*!

This is the long-form manual for `borda_count` and `bordacount`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, UTF-8, with a header row
* `xlsx` Excel spreadsheets (command line only)

### `csv`

The first row is the header. The columns that carry the choices are found by
their label: every label that starts with `Rank ` (any case, surrounding spaces
allowed) is a choice. The number that follows is the rank of the choice, so the
columns do not need to be in order in the file. Every other column is ignored.

```text
Timestamp,Rank 2,Rank 1,Rank 3
2024-05-01 10:00,Bob,Alice,
2024-05-01 10:02,,Carol,Alice
```

The first ballot is `Alice, Bob`, the second one is `Carol, Alice`.

Notes:
- A column labelled `Rank` followed by something that is not a number (for
  instance `Rank X`) is still read, after all the numbered ranks.
- Empty cells are skipped. A row with only empty choices is not a ballot.
- Names are compared exactly as typed, once the surrounding spaces are removed.
  `alice` and `Alice` are two different candidates.
- A name repeated on the same ballot is counted for each of its positions.
- Columns are read by position, not by label. If two columns share the same
  label (two `Rank 1` for instance), both are read, in header order.

### `xlsx`

The first worksheet (or the one given with `--excel-worksheet-name`) follows
the same layout as the CSV input. Text, number and boolean cells are accepted.

## Scoring

A ballot with `k` names gives `k` points to its first choice, `k - 1` to its
second choice and 1 point to its last choice. The points of all the ballots
are added together. Candidates with the same number of points are listed in
alphabetical order.

## Configuration

Instead of passing the input on the command line, `bordacount` accepts a
configuration file in JSON:

```text
{
  "outputSettings": { "contestName": "Board election" },
  "cvrFileSources": [
    { "provider": "csv", "filePath": "ballots_morning.csv" },
    { "provider": "xlsx", "filePath": "ballots_evening.xlsx", "excelWorksheetName": "Form1" }
  ],
  "rules": { "topCount": 3 }
}
```

The file paths are relative to the directory of the configuration file. The
ballots of all the sources are counted together. Any option given on the
command line takes precedence.

 */
